use axum::{Router, http::Uri, routing::get};

use crate::{error::AppError, state::AppState};

pub mod admin;
pub mod auth;
pub mod company;
pub mod doc;
pub mod health;
pub mod params;
pub mod user;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/user", user::router())
        .nest("/company", company::router())
        .nest("/admin", admin::router())
}

/// Health check, `/api` and the JSON fallback, bound to `state`. Transport layers are added by the binary.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("No route for {}", uri.path()))
}
