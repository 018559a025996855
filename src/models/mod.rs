mod investment;
mod stats;
mod user;

pub use investment::{
    CurrentPriceUpdate, DeleteResponse, Investment, InvestmentInput, InvestmentMetrics,
    InvestmentResponse, InvestmentType,
};
pub use stats::PortfolioStats;
pub use user::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User, UserInfo};
