use crate::handlers::users::user_summary;
use crate::schemas::{ApiError, ApiResponse, AppState, ErrorResponse};
use accounts::{FollowCounts, follow};
use axum::{
    extract::{Path, State},
    response::Json,
};
use common::{FollowCountsDto, FollowStatusDto, UserSummaryDto};
use tracing::{debug, error, info, instrument, trace, warn};

/// Follow counts for `user_id`, served from the cache when present.
pub(crate) async fn cached_follow_counts(
    state: &AppState,
    user_id: i32,
) -> accounts::Result<FollowCounts> {
    state.cache.counts_for(&state.db, user_id).await
}

/// List the users following a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/followers",
    tag = "follows",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Followers retrieved successfully", body = UserSummaryListApiResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_followers(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserSummaryDto>>>, ApiError> {
    trace!("Entering get_followers function for user_id: {}", user_id);

    let followers = follow::followers(&state.db, user_id).await.map_err(|e| {
        warn!("Failed to load followers of user {}: {}", user_id, e);
        ErrorResponse::from_accounts_error(&e)
    })?;

    info!("User {} has {} followers", user_id, followers.len());
    Ok(Json(ApiResponse {
        data: followers.into_iter().map(user_summary).collect(),
        message: "Followers retrieved successfully".to_string(),
        success: true,
    }))
}

/// List the users a user follows
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/following",
    tag = "follows",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Followed users retrieved successfully", body = UserSummaryListApiResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_following(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserSummaryDto>>>, ApiError> {
    trace!("Entering get_following function for user_id: {}", user_id);

    let following = follow::following(&state.db, user_id).await.map_err(|e| {
        warn!("Failed to load users followed by {}: {}", user_id, e);
        ErrorResponse::from_accounts_error(&e)
    })?;

    info!("User {} follows {} users", user_id, following.len());
    Ok(Json(ApiResponse {
        data: following.into_iter().map(user_summary).collect(),
        message: "Followed users retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get follower and following counts for a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/follow-counts",
    tag = "follows",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Follow counts retrieved successfully", body = FollowCountsApiResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_follow_counts(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FollowCountsDto>>, ApiError> {
    trace!("Entering get_follow_counts function for user_id: {}", user_id);

    let counts = cached_follow_counts(&state, user_id).await.map_err(|e| {
        warn!("Failed to load follow counts for user {}: {}", user_id, e);
        ErrorResponse::from_accounts_error(&e)
    })?;

    Ok(Json(ApiResponse {
        data: FollowCountsDto {
            user_id,
            followers: counts.followers,
            following: counts.following,
        },
        message: "Follow counts retrieved successfully".to_string(),
        success: true,
    }))
}

/// Make `user_id` follow `target_id`
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}/following/{target_id}",
    tag = "follows",
    params(
        ("user_id" = i32, Path, description = "ID of the follower"),
        ("target_id" = i32, Path, description = "ID of the user to follow"),
    ),
    responses(
        (status = 200, description = "Follow recorded", body = FollowStatusApiResponse),
        (status = 400, description = "A user cannot follow themselves", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn follow_user(
    Path((user_id, target_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FollowStatusDto>>, ApiError> {
    trace!("Entering follow_user function: {} -> {}", user_id, target_id);

    let changed = follow::follow(&state.db, user_id, target_id)
        .await
        .map_err(|e| {
            warn!("User {} failed to follow {}: {}", user_id, target_id, e);
            ErrorResponse::from_accounts_error(&e)
        })?;

    if changed {
        state.cache.invalidate(&[user_id, target_id]).await;
        info!("User {} now follows {}", user_id, target_id);
    } else {
        debug!("User {} already follows {}", user_id, target_id);
    }

    Ok(Json(ApiResponse {
        data: FollowStatusDto {
            follower_id: user_id,
            followee_id: target_id,
            following: true,
            changed,
        },
        message: if changed {
            "Follow recorded".to_string()
        } else {
            "Already following".to_string()
        },
        success: true,
    }))
}

/// Make `user_id` stop following `target_id`
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/following/{target_id}",
    tag = "follows",
    params(
        ("user_id" = i32, Path, description = "ID of the follower"),
        ("target_id" = i32, Path, description = "ID of the followed user"),
    ),
    responses(
        (status = 200, description = "Follow removed", body = FollowStatusApiResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn unfollow_user(
    Path((user_id, target_id)): Path<(i32, i32)>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FollowStatusDto>>, ApiError> {
    trace!("Entering unfollow_user function: {} -> {}", user_id, target_id);

    let changed = follow::unfollow(&state.db, user_id, target_id)
        .await
        .map_err(|e| {
            error!("User {} failed to unfollow {}: {}", user_id, target_id, e);
            ErrorResponse::from_accounts_error(&e)
        })?;

    if changed {
        state.cache.invalidate(&[user_id, target_id]).await;
        info!("User {} no longer follows {}", user_id, target_id);
    }

    Ok(Json(ApiResponse {
        data: FollowStatusDto {
            follower_id: user_id,
            followee_id: target_id,
            following: false,
            changed,
        },
        message: if changed {
            "Follow removed".to_string()
        } else {
            "Not following".to_string()
        },
        success: true,
    }))
}
