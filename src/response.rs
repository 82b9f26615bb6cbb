use chrono::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::model::{MoodEntry, Note, Todo, User};

#[derive(Serialize, Debug)]
pub struct FilteredUser {
    pub id: Uuid,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&User> for FilteredUser {
    fn from(user: &User) -> Self {
        FilteredUser {
            id: user.id,
            email: user.email.to_owned(),
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct UserResponse {
    pub status: &'static str,
    pub user: FilteredUser,
}

#[derive(Serialize, Debug)]
pub struct TokenResponse {
    pub status: &'static str,
    pub token: String,
}

#[derive(Serialize, Debug)]
pub struct TodoListResponse {
    pub status: &'static str,
    pub results: usize,
    pub todos: Vec<Todo>,
}

#[derive(Serialize, Debug)]
pub struct MoodListResponse {
    pub status: &'static str,
    pub results: usize,
    pub moods: Vec<MoodEntry>,
}

#[derive(Serialize, Debug)]
pub struct NoteListResponse {
    pub status: &'static str,
    pub results: usize,
    pub notes: Vec<Note>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub total: usize,
    pub completed: usize,
}

#[derive(Serialize, Debug)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub file_name: String,
    pub file_size: usize,
    pub file_type: String,
    pub text_length: usize,
    pub word_count: usize,
}

#[derive(Serialize, Debug)]
pub struct ParsedFileResponse {
    pub success: bool,
    pub text: String,
    pub metadata: FileMetadata,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetadata {
    pub original_length: usize,
    pub processed_length: usize,
    pub summary_length: usize,
    pub truncated: bool,
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Serialize, Debug)]
pub struct SummaryResponse {
    pub summary: String,
    pub metadata: SummaryMetadata,
}
