//! Axum route handlers for signup, login and logout.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::password::{generate_token, hash_password, token_digest, verify_credentials};
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::user::Session;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;
const BAD_CREDENTIALS: &str = "Incorrect email or password";

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

/// `Authorization: Bearer <token>`, rejected with 401 when absent or malformed.
#[derive(Debug)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

        let (scheme, token) = header
            .split_once(' ')
            .ok_or_else(|| AppError::Unauthorized("Malformed authorization header".to_string()))?;
        let token = token.trim();
        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return Err(AppError::Unauthorized(
                "Malformed authorization header".to_string(),
            ));
        }
        Ok(BearerToken(token.to_string()))
    }
}

/// Trims and lowercases; requires a `local@domain.tld` shape.
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    let (local, domain) = email.split_once('@')?;
    let valid = !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace);
    valid.then_some(email)
}

/// POST /signup
pub async fn handle_signup(
    State(state): State<AppState>,
    AppJson(req): AppJson<Credentials>,
) -> Result<Json<SignupResponse>, AppError> {
    let email = normalize_email(&req.email)
        .ok_or_else(|| AppError::Validation("email: a valid email address is required".to_string()))?;
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password: must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let user = state
        .accounts
        .create_user(&email, &hash_password(&req.password))
        .await?;
    info!("Created account {}", user.email);

    Ok(Json(SignupResponse {
        message: "User created successfully".to_string(),
        email: user.email,
    }))
}

/// POST /login
///
/// Every failure returns the same 401 so callers cannot tell which field was wrong.
pub async fn handle_login(
    State(state): State<AppState>,
    AppJson(req): AppJson<Credentials>,
) -> Result<Json<LoginResponse>, AppError> {
    let bad_credentials = || AppError::Unauthorized(BAD_CREDENTIALS.to_string());

    let user = match normalize_email(&req.email) {
        Some(email) => state.accounts.find_user_by_email(&email).await?,
        None => None,
    };
    let verified = verify_credentials(
        &req.password,
        user.as_ref().map(|u| u.password_hash.as_str()),
    );
    let user = match user {
        Some(user) if verified => user,
        _ => {
            warn!("Failed login for {}", req.email.trim());
            return Err(bad_credentials());
        }
    };
    let email = &user.email;

    let token = generate_token();
    let now = Utc::now();
    state
        .accounts
        .create_session(Session {
            token_hash: token_digest(&token),
            user_id: user.id,
            created_at: now,
            expires_at: session_expiry(now, state.config.session_ttl_minutes)?,
        })
        .await?;
    info!("User {email} logged in");

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

/// `now + ttl_minutes`, failing instead of overflowing on absurd TTLs.
pub fn session_expiry(now: DateTime<Utc>, ttl_minutes: i64) -> Result<DateTime<Utc>, AppError> {
    Duration::try_minutes(ttl_minutes)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "session TTL of {ttl_minutes} minutes is out of range"
            ))
        })
}

/// POST /logout
pub async fn handle_logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<StatusCode, AppError> {
    let digest = token_digest(&token);
    let session = state
        .accounts
        .find_session(&digest)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    // Expired sessions are removed too, but the caller still learns the token was dead.
    state.accounts.revoke_session(&digest).await?;
    if session.is_expired(Utc::now()) {
        return Err(AppError::Unauthorized("Invalid or expired token".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
