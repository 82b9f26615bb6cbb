use thiserror::Error;

const DEFAULT_JWT_MAXAGE_MINUTES: i64 = 60 * 24 * 7 * 4;
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_maxage_minutes: i64,
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub max_upload_bytes: usize,
    pub cors_origin: Option<String>,
    pub run_migrations: bool,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn init() -> Result<Config, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_maxage_minutes: parse_or("JWT_MAXAGE_MINUTES", get("JWT_MAXAGE_MINUTES"), DEFAULT_JWT_MAXAGE_MINUTES)?,
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_api_url: get("GEMINI_API_URL")
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_owned()),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()),
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", get("MAX_UPLOAD_BYTES"), DEFAULT_MAX_UPLOAD_BYTES)?,
            cors_origin: get("CORS_ORIGIN"),
            run_migrations: parse_or("RUN_MIGRATIONS", get("RUN_MIGRATIONS"), false)?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/flowmind"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.jwt_maxage_minutes, 40320);
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.gemini_api_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.gemini_api_key.is_none());
        assert!(!config.run_migrations);
    }

    #[test]
    fn missing_required_variable() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://x")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "  "), ("JWT_SECRET", "s")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn invalid_port() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "s"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn overrides_and_trailing_slash() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "s"),
            ("PORT", "9000"),
            ("GEMINI_API_KEY", "key"),
            ("GEMINI_API_URL", "http://127.0.0.1:1234/"),
            ("RUN_MIGRATIONS", "true"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.gemini_api_key.as_deref(), Some("key"));
        assert_eq!(config.gemini_api_url, "http://127.0.0.1:1234");
        assert!(config.run_migrations);
    }
}
