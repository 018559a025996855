use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Closed set of investment categories. Unknown values are rejected by the
/// validator and never reach storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "investment_type", rename_all = "snake_case")]
pub enum InvestmentType {
    Stock,
    Crypto,
    MutualFund,
    Etf,
    Fd,
    Bonds,
    RealEstate,
    Other,
}

impl InvestmentType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "stock" => Some(Self::Stock),
            "crypto" => Some(Self::Crypto),
            "mutual_fund" => Some(Self::MutualFund),
            "etf" => Some(Self::Etf),
            "fd" => Some(Self::Fd),
            "bonds" => Some(Self::Bonds),
            "real_estate" => Some(Self::RealEstate),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Crypto => "crypto",
            Self::MutualFund => "mutual_fund",
            Self::Etf => "etf",
            Self::Fd => "fd",
            Self::Bonds => "bonds",
            Self::RealEstate => "real_estate",
            Self::Other => "other",
        }
    }
}

// A single holding owned by one user. `current_price = None` means the user
// has not priced it yet; a stored 0.0 is a real price.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Investment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub investment_type: InvestmentType,
    pub quantity: f64,
    pub buy_price: f64,
    pub current_price: Option<f64>,
    pub buy_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Investment {
    pub fn new(
        user_id: Uuid,
        name: String,
        investment_type: InvestmentType,
        quantity: f64,
        buy_price: f64,
        current_price: Option<f64>,
        buy_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            investment_type,
            quantity,
            buy_price,
            current_price,
            buy_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Raw create/update payload. Numeric fields arrive as arbitrary JSON so the
/// validator can coerce numbers or numeric strings and distinguish a missing
/// field from a legal zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentInput {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub investment_type: Option<String>,
    pub quantity: Option<Value>,
    pub buy_price: Option<Value>,
    pub current_price: Option<Value>,
    pub buy_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPriceUpdate {
    pub current_price: Option<Value>,
}

/// Metrics derived from a stored investment on every read; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentMetrics {
    pub invested_value: f64,
    pub current_value: f64,
    pub profit_loss: f64,
    pub time_held_days: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,
    pub quantity: f64,
    pub buy_price: f64,
    pub current_price: Option<f64>,
    pub buy_date: DateTime<Utc>,
    pub invested_value: f64,
    pub current_value: f64,
    pub profit_loss: f64,
    pub time_held: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InvestmentResponse {
    pub fn new(investment: Investment, metrics: InvestmentMetrics) -> Self {
        Self {
            id: investment.id,
            user_id: investment.user_id,
            name: investment.name,
            investment_type: investment.investment_type,
            quantity: investment.quantity,
            buy_price: investment.buy_price,
            current_price: investment.current_price,
            buy_date: investment.buy_date,
            invested_value: metrics.invested_value,
            current_value: metrics.current_value,
            profit_loss: metrics.profit_loss,
            time_held: metrics.time_held_days,
            created_at: investment.created_at,
            updated_at: investment.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
