use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use tracing::debug;

use crate::{
    calendar::group_by_due_date,
    error::{ApiError, ApiResult},
    extractor::{AppJson, AppPath, AppQuery},
    jwt_auth::AuthUser,
    model::Todo,
    request::{
        check_range, clamp_limit, required, CalendarQuery, CreateTodo, ListTodos, UpdateTodo,
    },
    response::{CalendarResponse, TodoListResponse},
    AppState,
};

pub async fn list_todos_handler(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppQuery(params): AppQuery<ListTodos>,
) -> ApiResult<impl IntoResponse> {
    check_range(params.from, params.to)?;

    let todos = sqlx::query_as::<_, Todo>(
        "SELECT * FROM todos \
         WHERE user_id = $1 \
           AND ($2::date IS NULL OR due_date = $2) \
           AND ($3::date IS NULL OR due_date >= $3) \
           AND ($4::date IS NULL OR due_date <= $4) \
         ORDER BY created_at DESC \
         LIMIT $5",
    )
    .bind(user.id)
    .bind(params.due_date)
    .bind(params.from)
    .bind(params.to)
    .bind(clamp_limit(params.limit))
    .fetch_all(&data.db)
    .await?;

    debug!(user_id = %user.id, results = todos.len(), "Listed todos");
    Ok(Json(TodoListResponse {
        status: "success",
        results: todos.len(),
        todos,
    }))
}

pub async fn create_todo_handler(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppJson(body): AppJson<CreateTodo>,
) -> ApiResult<impl IntoResponse> {
    let task = required(&body.task, "task")?;

    let todo = sqlx::query_as::<_, Todo>(
        "INSERT INTO todos (task, due_date, user_id) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(task)
    .bind(body.due_date)
    .bind(user.id)
    .fetch_one(&data.db)
    .await?;

    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo_handler(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppPath(id): AppPath<i64>,
    AppJson(body): AppJson<UpdateTodo>,
) -> ApiResult<impl IntoResponse> {
    let task = match body.task.as_deref() {
        Some(task) => Some(required(task, "task")?),
        None => None,
    };

    let todo = sqlx::query_as::<_, Todo>(
        "UPDATE todos SET \
           task = COALESCE($3, task), \
           is_completed = COALESCE($4, is_completed), \
           due_date = CASE WHEN $6 THEN $5 ELSE due_date END \
         WHERE id = $1 AND user_id = $2 \
         RETURNING *",
    )
    .bind(id)
    .bind(user.id)
    .bind(task)
    .bind(body.is_completed)
    .bind(body.due_date.flatten())
    .bind(body.due_date.is_some())
    .fetch_optional(&data.db)
    .await?
    .ok_or_else(|| not_found(id))?;

    Ok(Json(todo))
}

pub async fn delete_todo_handler(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<impl IntoResponse> {
    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user.id)
        .execute(&data.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn todo_calendar_handler(
    State(data): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    AppQuery(params): AppQuery<CalendarQuery>,
) -> ApiResult<impl IntoResponse> {
    let (first, last) = params.bounds()?;

    let todos = sqlx::query_as::<_, Todo>(
        "SELECT * FROM todos \
         WHERE user_id = $1 AND due_date BETWEEN $2 AND $3 \
         ORDER BY due_date",
    )
    .bind(user.id)
    .bind(first)
    .bind(last)
    .fetch_all(&data.db)
    .await?;

    Ok(Json(CalendarResponse {
        year: params.year,
        month: params.month,
        days: group_by_due_date(&todos),
    }))
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Todo with id {id} not found"))
}
