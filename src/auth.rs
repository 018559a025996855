use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::password_hash::{
    rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier,
    SaltString,
};
use argon2::Argon2;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Vec<u8>,
    pub access_token_ttl: Duration,
}

impl AuthConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;
        let secret = secret.trim();
        if secret.is_empty() {
            anyhow::bail!("JWT_SECRET cannot be empty");
        }
        let ttl_secs = std::env::var("AUTH_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("AUTH_TOKEN_TTL_SECS must be a number of seconds"))?;
        Ok(Self {
            jwt_secret: secret.as_bytes().to_vec(),
            access_token_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

/// Bearer-token identity. Issues and validates the HS256 tokens that scope
/// every investment route to one user.
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: usize,
    exp: usize,
}

/// Authenticated user id, inserted into request extensions by `require_auth`.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

impl AuthManager {
    pub fn new(config: &AuthConfig) -> anyhow::Result<Self> {
        let encoding_key = EncodingKey::from_secret(&config.jwt_secret);
        let decoding_key = DecodingKey::from_secret(&config.jwt_secret);
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Ok(Self {
            encoding_key,
            decoding_key,
            validation,
            token_ttl: config.access_token_ttl,
        })
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
    }

    pub fn verify_password(&self, candidate: &str, stored_hash: &str) -> Result<(), AppError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| AppError::Internal(format!("Invalid stored password hash: {e}")))?;
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|err| match err {
                PasswordHashError::Password => AppError::InvalidCredentials,
                other => AppError::Internal(format!("Password verification failed: {other}")),
            })
    }

    pub fn issue_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AppError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))
    }

    pub fn validate_token(&self, token: &str) -> Result<Uuid, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
                | jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                    AppError::Unauthorized
                }
                other => AppError::Internal(format!("Failed to validate token: {other:?}")),
            })?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| AppError::Unauthorized)
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }
}

/// Rejects requests without a valid `Authorization: Bearer <token>` header
/// before any handler runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    let user_id = state.auth.validate_token(token)?;
    request.extensions_mut().insert(AuthUser(user_id));
    Ok(next.run(request).await)
}
