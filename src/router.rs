use crate::handlers::{
    follows::{follow_user, get_follow_counts, get_followers, get_following, unfollow_user},
    health::health_check,
    users::{create_user, delete_user, get_user, get_users, update_user},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    Router,
    routing::{get, put},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Users
        .route("/api/v1/users", get(get_users).post(create_user))
        .route(
            "/api/v1/users/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
        // Follower graph
        .route("/api/v1/users/:user_id/followers", get(get_followers))
        .route("/api/v1/users/:user_id/following", get(get_following))
        .route("/api/v1/users/:user_id/follow-counts", get(get_follow_counts))
        .route(
            "/api/v1/users/:user_id/following/:target_id",
            put(follow_user).delete(unfollow_user),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
