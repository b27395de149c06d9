use crate::handlers::follows::cached_follow_counts;
use crate::schemas::{ApiError, ApiResponse, AppState, ErrorResponse};
use accounts::{ExtraFields, FollowCounts, ProfileChanges};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::{CreateUserRequest, GenderDto, UpdateUserRequest, UserDto, UserSummaryDto};
use model::entities::user::{self, Gender};
use tracing::{debug, error, info, instrument, trace, warn};

pub(crate) fn gender_to_dto(gender: Gender) -> GenderDto {
    match gender {
        Gender::Others => GenderDto::Others,
        Gender::Male => GenderDto::Male,
        Gender::Female => GenderDto::Female,
    }
}

pub(crate) fn gender_from_dto(gender: GenderDto) -> Gender {
    match gender {
        GenderDto::Others => Gender::Others,
        GenderDto::Male => Gender::Male,
        GenderDto::Female => Gender::Female,
    }
}

pub(crate) fn user_dto(model: user::Model, counts: FollowCounts) -> UserDto {
    UserDto {
        id: model.id,
        full_name: model.full_name(),
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        gender: gender_to_dto(model.gender),
        birth_date: model.birth_date,
        location: model.location,
        bio: model.bio,
        verified: model.verified,
        profile_picture_url: model.profile_picture_url,
        cover_picture_url: model.cover_picture_url,
        is_staff: model.is_staff,
        is_superuser: model.is_superuser,
        is_active: model.is_active,
        date_joined: model.date_joined,
        last_login: model.last_login,
        n_followers: counts.followers,
        n_following: counts.following,
    }
}

pub(crate) fn user_summary(model: user::Model) -> UserSummaryDto {
    UserSummaryDto {
        id: model.id,
        full_name: model.full_name(),
        email: model.email,
        profile_picture_url: model.profile_picture_url,
    }
}

async fn with_counts(state: &AppState, model: user::Model) -> Result<UserDto, ApiError> {
    let counts = cached_follow_counts(state, model.id)
        .await
        .map_err(|e| ErrorResponse::from_accounts_error(&e))?;
    Ok(user_dto(model, counts))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserApiResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request), fields(email = %request.email))]
pub async fn create_user(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateUserRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    trace!("Entering create_user function");
    debug!("Creating user with email: {}", request.email);

    let fields = ExtraFields {
        birth_date: request.birth_date,
        first_name: request.first_name,
        last_name: request.last_name,
        gender: request.gender.map(gender_from_dto),
        location: request.location,
        bio: request.bio,
        profile_picture_url: request.profile_picture_url,
        cover_picture_url: request.cover_picture_url,
        verified: None,
        is_active: None,
        is_staff: None,
        is_superuser: None,
    };

    match state
        .manager
        .create_user(&request.email, request.password.as_deref(), fields)
        .await
    {
        Ok(user_model) => {
            info!(
                "User created successfully with ID: {}, email: {}",
                user_model.id, user_model.email
            );
            let response = ApiResponse {
                data: user_dto(user_model, FollowCounts::default()),
                message: "User created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(err) => {
            error!("Failed to create user '{}': {}", request.email, err);
            Err(ErrorResponse::from_accounts_error(&err))
        }
    }
}

/// Get all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = UserListApiResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    trace!("Entering get_users function");

    let users = state.manager.list().await.map_err(|e| {
        error!("Failed to retrieve users from database: {}", e);
        ErrorResponse::from_accounts_error(&e)
    })?;
    let user_count = users.len();
    debug!("Retrieved {} users from database", user_count);

    let mut data = Vec::with_capacity(user_count);
    for user_model in users {
        data.push(with_counts(&state, user_model).await?);
    }

    info!("Successfully retrieved {} users", user_count);
    Ok(Json(ApiResponse {
        data,
        message: "Users retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = UserApiResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    trace!("Entering get_user function for user_id: {}", user_id);

    let user_model = state.manager.get(user_id).await.map_err(|e| {
        warn!("Failed to retrieve user with ID {}: {}", user_id, e);
        ErrorResponse::from_accounts_error(&e)
    })?;

    info!("Successfully retrieved user with ID: {}", user_model.id);
    Ok(Json(ApiResponse {
        data: with_counts(&state, user_model).await?,
        message: "User retrieved successfully".to_string(),
        success: true,
    }))
}

/// Update a user's profile
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserApiResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateUserRequest>>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    trace!("Entering update_user function for user_id: {}", user_id);

    let changes = ProfileChanges {
        first_name: request.first_name,
        last_name: request.last_name,
        gender: request.gender.map(gender_from_dto),
        birth_date: request.birth_date,
        location: request.location,
        bio: request.bio,
        profile_picture_url: request.profile_picture_url,
        cover_picture_url: request.cover_picture_url,
        verified: request.verified,
        is_active: request.is_active,
    };

    let updated = state
        .manager
        .update_profile(user_id, changes)
        .await
        .map_err(|e| {
            error!("Failed to update user with ID {}: {}", user_id, e);
            ErrorResponse::from_accounts_error(&e)
        })?;

    info!("User with ID {} updated successfully", user_id);
    Ok(Json(ApiResponse {
        data: with_counts(&state, updated).await?,
        message: "User updated successfully".to_string(),
        success: true,
    }))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageApiResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    trace!("Entering delete_user function for user_id: {}", user_id);

    state.manager.delete(user_id).await.map_err(|e| {
        warn!("Failed to delete user with ID {}: {}", user_id, e);
        ErrorResponse::from_accounts_error(&e)
    })?;

    // Every user that followed or was followed by this one has a stale count now
    state.cache.invalidate_all();

    info!("User with ID {} deleted successfully", user_id);
    Ok(Json(ApiResponse {
        data: format!("User {} deleted", user_id),
        message: "User deleted successfully".to_string(),
        success: true,
    }))
}
