pub mod users;

use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::users::{repository::UserRepository, UserService, UserSettings};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService<dyn UserRepository>>,
}

impl AppState {
    pub fn new(repo: Arc<dyn UserRepository>, settings: UserSettings) -> Self {
        Self { users: Arc::new(UserService::new(repo, settings)) }
    }

    pub fn from_service(users: UserService<dyn UserRepository>) -> Self {
        Self { users: Arc::new(users) }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router with tracing and CORS layers applied.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", get(users::list_by_age).post(users::create))
        .route("/users/:id", patch(users::update).delete(users::delete))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
