use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    info!("POST /api/auth/register - Registering user");
    let response = services::user_service::register(&state.pool, &state.auth, input)
        .await
        .map_err(|e| {
            error!("Failed to register user: {}", e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    info!("POST /api/auth/login - Logging in");
    let response = services::user_service::login(&state.pool, &state.auth, input)
        .await
        .map_err(|e| {
            error!("Failed to log in: {}", e);
            e
        })?;
    Ok(Json(response))
}
