use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{
    CurrentPriceUpdate, Investment, InvestmentInput, InvestmentResponse, PortfolioStats,
};
use crate::services::{validation, valuation};

// Derived fields are recomputed on every read, never stored.
fn project(investment: Investment) -> InvestmentResponse {
    let metrics = valuation::derive_metrics(
        investment.buy_price,
        investment.quantity,
        investment.current_price,
        investment.buy_date,
        Utc::now(),
    );
    InvestmentResponse::new(investment, metrics)
}

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    input: InvestmentInput,
) -> Result<InvestmentResponse, AppError> {
    let validated = validation::validate_investment_input(&input)?;
    let investment = Investment::new(
        user_id,
        validated.name,
        validated.investment_type,
        validated.quantity,
        validated.buy_price,
        validated.current_price,
        validated.buy_date,
    );
    let stored = db::investment_queries::insert(pool, investment).await?;
    Ok(project(stored))
}

pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<InvestmentResponse>, AppError> {
    let investments = db::investment_queries::fetch_all_for_user(pool, user_id).await?;
    Ok(investments.into_iter().map(project).collect())
}

pub async fn fetch_one(
    pool: &PgPool,
    user_id: Uuid,
    raw_id: &str,
) -> Result<InvestmentResponse, AppError> {
    let id = validation::validate_investment_id(raw_id)?;
    let investment = db::investment_queries::fetch_one(pool, id, user_id)
        .await?
        .ok_or(AppError::NotFound("Investment"))?;
    Ok(project(investment))
}

pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    raw_id: &str,
    input: InvestmentInput,
) -> Result<InvestmentResponse, AppError> {
    let id = validation::validate_investment_id(raw_id)?;
    let validated = validation::validate_investment_input(&input)?;
    let updated = db::investment_queries::update(pool, id, user_id, &validated)
        .await?
        .ok_or(AppError::NotFound("Investment"))?;
    Ok(project(updated))
}

pub async fn update_current_price(
    pool: &PgPool,
    user_id: Uuid,
    raw_id: &str,
    input: CurrentPriceUpdate,
) -> Result<InvestmentResponse, AppError> {
    let id = validation::validate_investment_id(raw_id)?;
    let price = validation::validate_current_price(&input)?;
    let updated = db::investment_queries::update_current_price(pool, id, user_id, price)
        .await?
        .ok_or(AppError::NotFound("Investment"))?;
    Ok(project(updated))
}

pub async fn delete(pool: &PgPool, user_id: Uuid, raw_id: &str) -> Result<(), AppError> {
    let id = validation::validate_investment_id(raw_id)?;
    match db::investment_queries::delete(pool, id, user_id).await {
        Ok(0) => Err(AppError::NotFound("Investment")),
        Ok(_) => Ok(()),
        Err(e) => Err(AppError::from(e)),
    }
}

pub async fn stats(pool: &PgPool, user_id: Uuid) -> Result<PortfolioStats, AppError> {
    let investments = db::investment_queries::fetch_all_for_user(pool, user_id).await?;
    Ok(valuation::aggregate(&investments))
}
