use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{auth, health, investments};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/auth", auth::router())
        .nest("/api/investments", investments::router(state.clone()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
