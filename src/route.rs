use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        create_mood_handler, create_note_handler, create_todo_handler, delete_mood_handler,
        delete_note_handler, delete_todo_handler, get_me_handler, get_note_handler,
        health_checker_handler, list_moods_handler, list_notes_handler, list_todos_handler,
        login_user_handler, logout_handler, parse_file_handler, register_user_handler,
        summarize_handler, todo_calendar_handler, update_note_handler, update_todo_handler,
    },
    jwt_auth::auth,
    AppState,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/auth/logout", get(logout_handler))
        .route("/api/users/me", get(get_me_handler))
        .route("/api/todos", get(list_todos_handler).post(create_todo_handler))
        .route("/api/todos/calendar", get(todo_calendar_handler))
        .route(
            "/api/todos/:id",
            patch(update_todo_handler).delete(delete_todo_handler),
        )
        .route("/api/moods", get(list_moods_handler).post(create_mood_handler))
        .route("/api/moods/:id", delete(delete_mood_handler))
        .route("/api/notes", get(list_notes_handler).post(create_note_handler))
        .route(
            "/api/notes/:id",
            get(get_note_handler)
                .patch(update_note_handler)
                .delete(delete_note_handler),
        )
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth));

    let upload_limit = app_state.config.max_upload_bytes;

    Router::new()
        .route("/api/healthchecker", get(health_checker_handler))
        .route("/api/auth/register", post(register_user_handler))
        .route("/api/auth/login", post(login_user_handler))
        .route(
            "/api/parse-file",
            post(parse_file_handler).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/summarize", post(summarize_handler))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
