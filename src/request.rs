use chrono::prelude::*;
use serde::{Deserialize, Deserializer};

use crate::error::ApiError;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 500;
pub const MIN_PASSWORD_CHARS: usize = 8;
pub const UNTITLED_NOTE: &str = "Untitled Note";

#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
}

impl RegisterUser {
    /// Returns the normalized (trimmed, lowercased) email.
    pub fn validate(&self) -> Result<String, ApiError> {
        let email = normalize_email(&self.email);
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(ApiError::BadRequest("A valid email address is required".into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ApiError::BadRequest(format!(
                "Password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }
        Ok(email)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[derive(Debug, Deserialize, Default)]
pub struct ListTodos {
    pub due_date: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTodo {
    pub task: String,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateTodo {
    pub task: Option<String>,
    pub is_completed: Option<bool>,
    /// Absent keeps the stored date, `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<NaiveDate>>,
}

/// Wraps any value that is present in the body, `null` included, so it can be
/// told apart from a missing field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
}

impl CalendarQuery {
    /// First and last day of the requested month.
    pub fn bounds(&self) -> Result<(NaiveDate, NaiveDate), ApiError> {
        let invalid = || ApiError::BadRequest(format!("Invalid month: {}-{}", self.year, self.month));
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(invalid)?;
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        }
        .ok_or_else(invalid)?;
        let last = next.pred_opt().ok_or_else(invalid)?;
        Ok((first, last))
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct ListMoods {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMood {
    pub mood_text: String,
    pub mood_emoji: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListNotes {
    pub search: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNote {
    pub title: Option<String>,
    pub content: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateNote {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeText {
    #[serde(default)]
    pub text: Option<String>,
}

/// Trims `value` and rejects it when nothing is left.
pub fn required(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_owned())
}

/// Trims `value`, mapping blank input to `None`.
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

pub fn check_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<(), ApiError> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(ApiError::BadRequest(
            "`from` must not be after `to`".into(),
        )),
        _ => Ok(()),
    }
}

pub fn note_title(title: Option<&str>) -> String {
    optional(title).unwrap_or_else(|| UNTITLED_NOTE.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn register_normalizes_email() {
        let body = RegisterUser {
            email: "  Ada@Example.COM ".into(),
            password: "correct horse".into(),
        };
        assert_eq!(body.validate().unwrap(), "ada@example.com");
    }

    #[test]
    fn register_rejects_short_password_and_bad_email() {
        let short = RegisterUser {
            email: "ada@example.com".into(),
            password: "short".into(),
        };
        assert!(matches!(short.validate(), Err(ApiError::BadRequest(_))));

        let no_at = RegisterUser {
            email: "ada.example.com".into(),
            password: "long enough".into(),
        };
        assert!(matches!(no_at.validate(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("  buy milk ", "task").unwrap(), "buy milk");
        match required(" \n", "task") {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "task must not be empty"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(clamp_limit(None), 100);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(10_000)), 500);
        assert_eq!(clamp_limit(Some(25)), 25);
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert!(check_range(Some(date(2024, 5, 2)), Some(date(2024, 5, 1))).is_err());
        assert!(check_range(Some(date(2024, 5, 1)), Some(date(2024, 5, 1))).is_ok());
        assert!(check_range(None, Some(date(2024, 5, 1))).is_ok());
    }

    #[test]
    fn blank_title_becomes_untitled() {
        assert_eq!(note_title(None), "Untitled Note");
        assert_eq!(note_title(Some("   ")), "Untitled Note");
        assert_eq!(note_title(Some(" Plans ")), "Plans");
    }

    #[test]
    fn todo_due_date_distinguishes_null_from_absent() {
        let absent: UpdateTodo = serde_json::from_str(r#"{"is_completed": true}"#).unwrap();
        assert_eq!(absent.due_date, None);
        assert_eq!(absent.is_completed, Some(true));

        let cleared: UpdateTodo = serde_json::from_str(r#"{"due_date": null}"#).unwrap();
        assert_eq!(cleared.due_date, Some(None));

        let set: UpdateTodo = serde_json::from_str(r#"{"due_date": "2024-05-01"}"#).unwrap();
        assert_eq!(set.due_date, Some(Some(date(2024, 5, 1))));

        assert!(serde_json::from_str::<UpdateTodo>(r#"{"due_date": "soon"}"#).is_err());
    }

    #[test]
    fn calendar_bounds() {
        let february = CalendarQuery { year: 2024, month: 2 };
        assert_eq!(february.bounds().unwrap(), (date(2024, 2, 1), date(2024, 2, 29)));

        let december = CalendarQuery { year: 2023, month: 12 };
        assert_eq!(december.bounds().unwrap(), (date(2023, 12, 1), date(2023, 12, 31)));

        let invalid = CalendarQuery { year: 2024, month: 13 };
        assert!(invalid.bounds().is_err());
    }
}
