use crate::cache::FollowCountsCache;
use accounts::{AccountsError, UserManager};
use axum::{http::StatusCode, response::Json};
use common::{
    CreateUserRequest, FollowCountsDto, FollowStatusDto, GenderDto, UpdateUserRequest, UserDto,
    UserSummaryDto,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// User creation, lookup and authentication
    pub manager: UserManager,
    /// Follower/following counts per user id
    pub cache: FollowCountsCache,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
#[aliases(
    UserApiResponse = ApiResponse<UserDto>,
    UserListApiResponse = ApiResponse<Vec<UserDto>>,
    UserSummaryListApiResponse = ApiResponse<Vec<UserSummaryDto>>,
    FollowCountsApiResponse = ApiResponse<FollowCountsDto>,
    FollowStatusApiResponse = ApiResponse<FollowStatusDto>,
    MessageApiResponse = ApiResponse<String>
)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }

    /// Maps an accounts error to a status code and error body.
    pub fn from_accounts_error(err: &AccountsError) -> ApiError {
        let (status, response) = match err {
            AccountsError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(message.clone(), "VALIDATION_ERROR"),
            ),
            AccountsError::UserNotFound(user_id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(format!("User {} not found", user_id), "USER_NOT_FOUND"),
            ),
            err if err.is_unique_violation() => (
                StatusCode::CONFLICT,
                ErrorResponse::new("A user with this email already exists", "EMAIL_ALREADY_EXISTS"),
            ),
            AccountsError::PasswordHash(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Failed to process password", "PASSWORD_HASH_ERROR"),
            ),
            AccountsError::Database(db_error) => {
                error!("Database error: {}", db_error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error", "DATABASE_ERROR"),
                )
            }
        };
        (status, Json(response))
    }
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::follows::get_followers,
        crate::handlers::follows::get_following,
        crate::handlers::follows::get_follow_counts,
        crate::handlers::follows::follow_user,
        crate::handlers::follows::unfollow_user,
    ),
    components(
        schemas(
            UserApiResponse,
            UserListApiResponse,
            UserSummaryListApiResponse,
            FollowCountsApiResponse,
            FollowStatusApiResponse,
            MessageApiResponse,
            ErrorResponse,
            HealthResponse,
            CreateUserRequest,
            UpdateUserRequest,
            UserDto,
            UserSummaryDto,
            GenderDto,
            FollowCountsDto,
            FollowStatusDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User account endpoints"),
        (name = "follows", description = "Follower graph endpoints"),
    ),
    info(
        title = "Socialite API",
        description = "User accounts and follower graph for the Socialite social network",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
