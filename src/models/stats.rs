use serde::Serialize;

// Portfolio-wide totals for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub total_invested: f64,
    pub total_current: f64,
    pub overall_profit_loss: f64,
}
