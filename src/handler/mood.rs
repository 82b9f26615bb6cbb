use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    error::{ApiError, ApiResult},
    extractor::{AppJson, AppPath, AppQuery},
    jwt_auth::AuthUser,
    model::MoodEntry,
    request::{check_range, clamp_limit, optional, required, CreateMood, ListMoods},
    response::MoodListResponse,
    AppState,
};

pub async fn list_moods_handler(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppQuery(params): AppQuery<ListMoods>,
) -> ApiResult<impl IntoResponse> {
    check_range(params.from, params.to)?;

    // created_at is compared by its UTC calendar date
    let moods = sqlx::query_as::<_, MoodEntry>(
        "SELECT * FROM mood_entries \
         WHERE user_id = $1 \
           AND ($2::date IS NULL OR (created_at AT TIME ZONE 'UTC')::date >= $2) \
           AND ($3::date IS NULL OR (created_at AT TIME ZONE 'UTC')::date <= $3) \
         ORDER BY created_at DESC \
         LIMIT $4",
    )
    .bind(user.id)
    .bind(params.from)
    .bind(params.to)
    .bind(clamp_limit(params.limit))
    .fetch_all(&data.db)
    .await?;

    Ok(Json(MoodListResponse {
        status: "success",
        results: moods.len(),
        moods,
    }))
}

pub async fn create_mood_handler(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppJson(body): AppJson<CreateMood>,
) -> ApiResult<impl IntoResponse> {
    let mood_text = required(&body.mood_text, "mood_text")?;
    let mood_emoji = required(&body.mood_emoji, "mood_emoji")?;

    let mood = sqlx::query_as::<_, MoodEntry>(
        "INSERT INTO mood_entries (mood_text, mood_emoji, description, user_id) \
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(mood_text)
    .bind(mood_emoji)
    .bind(optional(body.description.as_deref()))
    .bind(user.id)
    .fetch_one(&data.db)
    .await?;

    Ok((StatusCode::CREATED, Json(mood)))
}

pub async fn delete_mood_handler(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let result = sqlx::query("DELETE FROM mood_entries WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&data.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!("Mood entry with id {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
