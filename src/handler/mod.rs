mod auth;
mod file;
mod health;
mod mood;
mod note;
mod summary;
mod todo;

pub use auth::{get_me_handler, login_user_handler, logout_handler, register_user_handler};
pub use file::parse_file_handler;
pub use health::health_checker_handler;
pub use mood::{create_mood_handler, delete_mood_handler, list_moods_handler};
pub use note::{
    create_note_handler, delete_note_handler, get_note_handler, list_notes_handler,
    update_note_handler,
};
pub use summary::summarize_handler;
pub use todo::{
    create_todo_handler, delete_todo_handler, list_todos_handler, todo_calendar_handler,
    update_todo_handler,
};
