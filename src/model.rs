use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, sqlx::FromRow, Serialize, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, sqlx::FromRow, Serialize, Clone)]
pub struct Todo {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub task: String,
    pub is_completed: bool,
    pub due_date: Option<NaiveDate>,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, sqlx::FromRow, Serialize, Clone)]
pub struct MoodEntry {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub mood_text: String,
    pub mood_emoji: String,
    pub description: Option<String>,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, sqlx::FromRow, Serialize, Clone)]
pub struct Note {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
}
