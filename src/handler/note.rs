use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use tracing::warn;

use crate::{
    error::{ApiError, ApiResult},
    extractor::{AppJson, AppPath, AppQuery},
    jwt_auth::AuthUser,
    model::Note,
    request::{clamp_limit, note_title, optional, required, CreateNote, ListNotes, UpdateNote},
    response::NoteListResponse,
    AppState,
};

pub async fn list_notes_handler(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppQuery(params): AppQuery<ListNotes>,
) -> ApiResult<impl IntoResponse> {
    let pattern = optional(params.search.as_deref()).map(|search| format!("%{}%", escape_like(&search)));

    let notes = sqlx::query_as::<_, Note>(
        "SELECT * FROM notes \
         WHERE user_id = $1 \
           AND ($2::text IS NULL OR title ILIKE $2 OR content ILIKE $2) \
         ORDER BY updated_at DESC \
         LIMIT $3",
    )
    .bind(user.id)
    .bind(pattern)
    .bind(clamp_limit(params.limit))
    .fetch_all(&data.db)
    .await
    .map_err(|e| {
        warn!(user_id = %user.id, error = %e, "Failed to fetch notes");
        e
    })?;

    Ok(Json(NoteListResponse {
        status: "success",
        results: notes.len(),
        notes,
    }))
}

pub async fn get_note_handler(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let note = sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .fetch_optional(&data.db)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(note))
}

pub async fn create_note_handler(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppJson(body): AppJson<CreateNote>,
) -> ApiResult<impl IntoResponse> {
    let content = required(&body.content, "content")?;

    let note = sqlx::query_as::<_, Note>(
        "INSERT INTO notes (title, content, user_id) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(note_title(body.title.as_deref()))
    .bind(content)
    .bind(user.id)
    .fetch_one(&data.db)
    .await?;

    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn update_note_handler(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<UpdateNote>,
) -> ApiResult<impl IntoResponse> {
    let content = match body.content.as_deref() {
        Some(content) => Some(required(content, "content")?),
        None => None,
    };
    let title = body.title.as_deref().map(|title| note_title(Some(title)));

    let note = sqlx::query_as::<_, Note>(
        "UPDATE notes SET \
           title = COALESCE($3, title), \
           content = COALESCE($4, content), \
           updated_at = NOW() \
         WHERE id = $1 AND user_id = $2 \
         RETURNING *",
    )
    .bind(id)
    .bind(user.id)
    .bind(title)
    .bind(content)
    .fetch_optional(&data.db)
    .await?
    .ok_or_else(|| not_found(id))?;

    Ok(Json(note))
}

pub async fn delete_note_handler(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&data.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Note with id {id} not found"))
}

/// Escapes LIKE wildcards so a search matches literally.
fn escape_like(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len());
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_wildcards() {
        assert_eq!(escape_like("100%_done\\"), "100\\%\\_done\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
