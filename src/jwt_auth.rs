use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::ApiError, model::User, AppState};

pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

/// The authenticated caller, inserted as a request extension by [`auth`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

pub fn issue_token(user: &User, secret: &str, maxage_minutes: i64) -> Result<String, ApiError> {
    let now = chrono::Utc::now();
    let claims = TokenClaims {
        sub: user.id.to_string(),
        email: user.email.to_owned(),
        iat: now.timestamp() as usize,
        exp: (now + chrono::Duration::minutes(maxage_minutes)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Error while signing token: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<TokenClaims, ApiError> {
    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized("Invalid or expired token".into()))
}

fn bearer_token(req: &Request) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}

pub async fn auth(
    cookie_jar: CookieJar,
    State(data): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let token = cookie_jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|token| !token.is_empty())
        .or_else(|| bearer_token(&req))
        .ok_or_else(|| ApiError::Unauthorized("You are not logged in, please provide a token".into()))?;

    let claims = verify_token(&token, &data.config.jwt_secret)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::Unauthorized("Invalid token".into()))?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&data.db)
        .await?
        .ok_or_else(|| {
            ApiError::Unauthorized("The user belonging to this token no longer exists".into())
        })?;

    req.extensions_mut().insert(AuthUser {
        id: user.id,
        email: user.email,
    });
    Ok(next.run(req).await)
}
