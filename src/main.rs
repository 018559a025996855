use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use investment_tracker_backend::app;
use investment_tracker_backend::auth::{AuthConfig, AuthManager};
use investment_tracker_backend::logging::{self, LoggingConfig};
use investment_tracker_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init_logging(LoggingConfig::from_env())?;

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let auth = Arc::new(AuthManager::new(&AuthConfig::from_env()?)?);
    let state = AppState { pool, auth };
    let app = app::create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Investment tracker backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
