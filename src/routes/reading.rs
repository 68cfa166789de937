use axum::{extract::State, Json};

use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::models::reading::{ArticleResponse, ReadingMaterial};
use crate::AppState;

/// The reading-module article
///
/// Serves the first seeded material; 404 when the table has not been seeded.
pub async fn get_article(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<ArticleResponse>> {
    let material: Option<ReadingMaterial> = sqlx::query_as(
        r"
        SELECT id, title, subtitle, content, questions
        FROM reading_materials
        ORDER BY id
        LIMIT 1
        ",
    )
    .fetch_optional(&state.pool)
    .await?;

    let material = material.ok_or(AppError::ArticleNotFound)?;

    Ok(Json(material.into_response()))
}
