use sqlx::PgPool;

use crate::auth::AuthManager;
use crate::db;
use crate::errors::AppError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User, UserInfo};

pub async fn register(
    pool: &PgPool,
    auth: &AuthManager,
    input: RegisterRequest,
) -> Result<RegisterResponse, AppError> {
    let email = input.email.as_deref().map(str::trim).unwrap_or("");
    let password = input.password.as_deref().unwrap_or("");

    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation("Email and password are required".into()));
    }
    if password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }

    let email = email.to_lowercase();
    if db::user_queries::find_by_email(pool, &email).await?.is_some() {
        return Err(AppError::Validation(
            "User with this email already exists".into(),
        ));
    }

    let password_hash = auth.hash_password(password)?;
    let user = db::user_queries::insert(pool, User::new(email, password_hash)).await?;

    Ok(RegisterResponse {
        message: "User created successfully".to_string(),
        user: UserInfo {
            id: user.id,
            email: user.email,
        },
    })
}

pub async fn login(
    pool: &PgPool,
    auth: &AuthManager,
    input: LoginRequest,
) -> Result<LoginResponse, AppError> {
    let email = input.email.as_deref().map(str::trim).unwrap_or("");
    let password = input.password.as_deref().unwrap_or("");

    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation("Email and password are required".into()));
    }

    let user = db::user_queries::find_by_email(pool, &email.to_lowercase())
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    auth.verify_password(password, &user.password_hash)?;
    let token = auth.issue_token(user.id)?;

    Ok(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: auth.expires_in().as_secs(),
    })
}
