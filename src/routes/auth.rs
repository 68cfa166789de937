use axum::{extract::State, http::HeaderMap, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{create_session, hash_password, revoke_session, verify_password};
use crate::error::{AppError, Result};
use crate::models::user::{validate_credentials, User};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Create an account and sign the new user in
///
/// Returns 409 Conflict when the email is already registered.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>> {
    let email = payload.email.trim().to_lowercase();
    validate_credentials(&email, &payload.password)?;

    let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)")
        .bind(&email)
        .fetch_one(&state.pool)
        .await?;
    if taken {
        return Err(AppError::EmailTaken);
    }

    let user_id = Uuid::new_v4().to_string();
    let password_hash = hash_password(&payload.password)?;

    sqlx::query(
        r"
        INSERT INTO users (id, email, password_hash, created_at)
        VALUES (?1, ?2, ?3, ?4)
        ",
    )
    .bind(&user_id)
    .bind(&email)
    .bind(&password_hash)
    .bind(Utc::now())
    .execute(&state.pool)
    .await?;

    let token = create_session(&state.pool, &user_id, state.config.session_ttl_hours).await?;

    tracing::info!("New account registered");

    Ok(Json(SessionResponse { token, user_id }))
}

/// Sign in with email and password
///
/// An unknown email and a wrong password are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>> {
    let email = payload.email.trim().to_lowercase();

    let user: Option<User> = sqlx::query_as(
        "SELECT id, email, password_hash, created_at FROM users WHERE email = ?1",
    )
    .bind(&email)
    .fetch_optional(&state.pool)
    .await?;

    let user = user.ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let token = create_session(&state.pool, &user.id, state.config.session_ttl_hours).await?;

    Ok(Json(SessionResponse {
        token,
        user_id: user.id,
    }))
}

/// Drop the caller's session
///
/// Succeeds even without a valid token; signing out twice is not an error.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "));

    if let Some(token) = token {
        revoke_session(&state.pool, token).await?;
    }

    Ok(Json(LogoutResponse { success: true }))
}
