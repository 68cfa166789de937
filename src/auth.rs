use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::AppState;

/// Hash a password with Argon2id (salt embedded in the output string)
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored Argon2 hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Digest a bearer token for at-rest storage
///
/// Only the SHA-256 of the token ever reaches the database, so a leaked
/// sessions table cannot be replayed.
pub fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Issue a new session for `user_id`, returning the raw bearer token
pub async fn create_session(pool: &SqlitePool, user_id: &str, ttl_hours: i64) -> Result<String> {
    let token = Uuid::new_v4().to_string();
    let now = Utc::now();
    let expires_at = now + Duration::hours(ttl_hours);

    sqlx::query(
        r"
        INSERT INTO sessions (token_hash, user_id, created_at, expires_at)
        VALUES (?1, ?2, ?3, ?4)
        ",
    )
    .bind(token_digest(&token))
    .bind(user_id)
    .bind(now)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(token)
}

/// Drop the session behind `token`; unknown tokens are a silent no-op
pub async fn revoke_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token_hash = ?1")
        .bind(token_digest(token))
        .execute(pool)
        .await?;

    Ok(())
}

/// Resolve a bearer token to a user id, if the session exists and is current
pub async fn resolve_session(pool: &SqlitePool, token: &str) -> Result<Option<String>> {
    let row: Option<(String, DateTime<Utc>)> =
        sqlx::query_as("SELECT user_id, expires_at FROM sessions WHERE token_hash = ?1")
            .bind(token_digest(token))
            .fetch_optional(pool)
            .await?;

    match row {
        Some((user_id, expires_at)) if expires_at > Utc::now() => Ok(Some(user_id)),
        _ => Ok(None),
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
}

/// Authenticated identity extracted from the Authorization header
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let app_state = AppState::from_ref(state);

        match resolve_session(&app_state.pool, token).await? {
            Some(user_id) => Ok(AuthUser { user_id }),
            None => {
                tracing::warn!("Rejected stale or unknown session token");
                Err(AppError::Unauthorized)
            }
        }
    }
}

/// Identity that may be absent
///
/// The streak routes report a zero/unsuccessful body instead of a 401 when
/// nobody is signed in, so they extract the identity as optional.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Some(token) = bearer_token(parts) else {
            return Ok(OptionalAuthUser(None));
        };
        let app_state = AppState::from_ref(state);

        let user = resolve_session(&app_state.pool, token)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("Session lookup failed: {e}");
                None
            })
            .map(|user_id| AuthUser { user_id });

        Ok(OptionalAuthUser(user))
    }
}
