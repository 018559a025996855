use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{middleware, Extension, Json, Router};
use tracing::{error, info};

use crate::auth::{require_auth, AuthUser};
use crate::errors::AppError;
use crate::models::{
    CurrentPriceUpdate, DeleteResponse, InvestmentInput, InvestmentResponse, PortfolioStats,
};
use crate::services;
use crate::state::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_investment).get(list_investments))
        .route("/stats", get(get_stats))
        .route(
            "/:id",
            get(get_investment)
                .put(update_investment)
                .delete(delete_investment),
        )
        .route("/:id/current-price", patch(update_current_price))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

pub async fn create_investment(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(input): Json<InvestmentInput>,
) -> Result<(StatusCode, Json<InvestmentResponse>), AppError> {
    info!("POST /api/investments - Creating investment");
    let investment = services::investment_service::create(&state.pool, user_id, input)
        .await
        .map_err(|e| {
            error!("Failed to create investment: {}", e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(investment)))
}

pub async fn list_investments(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<Vec<InvestmentResponse>>, AppError> {
    info!("GET /api/investments - Listing investments");
    let investments = services::investment_service::list(&state.pool, user_id)
        .await
        .map_err(|e| {
            error!("Failed to list investments: {}", e);
            e
        })?;
    Ok(Json(investments))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<PortfolioStats>, AppError> {
    info!("GET /api/investments/stats - Getting portfolio stats");
    let stats = services::investment_service::stats(&state.pool, user_id)
        .await
        .map_err(|e| {
            error!("Failed to get portfolio stats: {}", e);
            e
        })?;
    Ok(Json(stats))
}

pub async fn get_investment(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<InvestmentResponse>, AppError> {
    info!("GET /api/investments/{} - Getting investment", id);
    let investment = services::investment_service::fetch_one(&state.pool, user_id, &id)
        .await
        .map_err(|e| {
            error!("Failed to get investment {}: {}", id, e);
            e
        })?;
    Ok(Json(investment))
}

pub async fn update_investment(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(input): Json<InvestmentInput>,
) -> Result<Json<InvestmentResponse>, AppError> {
    info!("PUT /api/investments/{} - Updating investment", id);
    let investment = services::investment_service::update(&state.pool, user_id, &id, input)
        .await
        .map_err(|e| {
            error!("Failed to update investment {}: {}", id, e);
            e
        })?;
    Ok(Json(investment))
}

pub async fn update_current_price(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(input): Json<CurrentPriceUpdate>,
) -> Result<Json<InvestmentResponse>, AppError> {
    info!(
        "PATCH /api/investments/{}/current-price - Updating current price",
        id
    );
    let investment =
        services::investment_service::update_current_price(&state.pool, user_id, &id, input)
            .await
            .map_err(|e| {
                error!("Failed to update current price for {}: {}", id, e);
                e
            })?;
    Ok(Json(investment))
}

pub async fn delete_investment(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    info!("DELETE /api/investments/{} - Deleting investment", id);
    services::investment_service::delete(&state.pool, user_id, &id)
        .await
        .map_err(|e| {
            error!("Failed to delete investment {}: {}", id, e);
            e
        })?;
    Ok(Json(DeleteResponse {
        message: "Investment deleted successfully".to_string(),
    }))
}
