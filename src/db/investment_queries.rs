use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Investment;
use crate::services::validation::ValidatedInvestment;

pub async fn insert(pool: &PgPool, investment: Investment) -> Result<Investment, sqlx::Error> {
    sqlx::query_as::<_, Investment>(
        "INSERT INTO investments (id, user_id, name, investment_type, quantity, buy_price,
                                  current_price, buy_date, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING id, user_id, name, investment_type, quantity, buy_price, current_price,
                   buy_date, created_at, updated_at",
    )
    .bind(investment.id)
    .bind(investment.user_id)
    .bind(investment.name)
    .bind(investment.investment_type)
    .bind(investment.quantity)
    .bind(investment.buy_price)
    .bind(investment.current_price)
    .bind(investment.buy_date)
    .bind(investment.created_at)
    .bind(investment.updated_at)
    .fetch_one(pool)
    .await
}

pub async fn fetch_all_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Investment>, sqlx::Error> {
    sqlx::query_as::<_, Investment>(
        "SELECT * FROM investments WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<Investment>, sqlx::Error> {
    sqlx::query_as::<_, Investment>("SELECT * FROM investments WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    input: &ValidatedInvestment,
) -> Result<Option<Investment>, sqlx::Error> {
    sqlx::query_as::<_, Investment>(
        "UPDATE investments
         SET name = $3, investment_type = $4, quantity = $5, buy_price = $6,
             current_price = $7, buy_date = $8, updated_at = now()
         WHERE id = $1 AND user_id = $2
         RETURNING id, user_id, name, investment_type, quantity, buy_price, current_price,
                   buy_date, created_at, updated_at",
    )
    .bind(id)
    .bind(user_id)
    .bind(input.name.as_str())
    .bind(input.investment_type)
    .bind(input.quantity)
    .bind(input.buy_price)
    .bind(input.current_price)
    .bind(input.buy_date)
    .fetch_optional(pool)
    .await
}

pub async fn update_current_price(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    current_price: f64,
) -> Result<Option<Investment>, sqlx::Error> {
    sqlx::query_as::<_, Investment>(
        "UPDATE investments
         SET current_price = $3, updated_at = now()
         WHERE id = $1 AND user_id = $2
         RETURNING id, user_id, name, investment_type, quantity, buy_price, current_price,
                   buy_date, created_at, updated_at",
    )
    .bind(id)
    .bind(user_id)
    .bind(current_price)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM investments WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
