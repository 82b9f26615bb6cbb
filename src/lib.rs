pub mod calendar;
pub mod config;
pub mod error;
pub mod extract;
pub mod extractor;
pub mod gemini;
pub mod handler;
pub mod jwt_auth;
pub mod model;
pub mod request;
pub mod response;
pub mod route;
pub mod summarize;

use sqlx::{Pool, Postgres};

pub use route::create_router;

pub struct AppState {
    pub db: Pool<Postgres>,
    pub config: config::Config,
    pub gemini: gemini::GeminiClient,
}
