use std::sync::Arc;

use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use rand_core::OsRng;
use serde_json::json;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    extractor::AppJson,
    jwt_auth::{issue_token, AuthUser, TOKEN_COOKIE},
    model::User,
    request::{normalize_email, LoginUser, RegisterUser},
    response::{FilteredUser, TokenResponse, UserResponse},
    AppState,
};

pub async fn register_user_handler(
    State(data): State<Arc<AppState>>,
    AppJson(body): AppJson<RegisterUser>,
) -> ApiResult<impl IntoResponse> {
    let email = body.validate()?;

    let salt = SaltString::generate(&mut OsRng);
    let hashed_password = Argon2::default()
        .hash_password(body.password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Error while hashing password: {e}")))
        .map(|hash| hash.to_string())?;

    // The unique index decides concurrent registrations for the same email.
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password) VALUES ($1, $2) \
         ON CONFLICT (email) DO NOTHING \
         RETURNING *",
    )
    .bind(&email)
    .bind(hashed_password)
    .fetch_optional(&data.db)
    .await?
    .ok_or_else(|| ApiError::Conflict("User with that email already exists".into()))?;

    info!(user_id = %user.id, "Registered user");
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            status: "success",
            user: FilteredUser::from(&user),
        }),
    ))
}

pub async fn login_user_handler(
    State(data): State<Arc<AppState>>,
    AppJson(body): AppJson<LoginUser>,
) -> ApiResult<impl IntoResponse> {
    let invalid = || ApiError::BadRequest("Invalid email or password".into());

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(normalize_email(&body.email))
        .fetch_optional(&data.db)
        .await?
        .ok_or_else(invalid)?;

    let is_valid = match PasswordHash::new(&user.password) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(body.password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    };
    if !is_valid {
        return Err(invalid());
    }

    let maxage = data.config.jwt_maxage_minutes;
    let token = issue_token(&user, &data.config.jwt_secret, maxage)?;

    let cookie = Cookie::build((TOKEN_COOKIE, token.to_owned()))
        .path("/")
        .max_age(time::Duration::minutes(maxage))
        .same_site(SameSite::Lax)
        .http_only(true)
        .build();

    let mut response = Json(TokenResponse {
        status: "success",
        token,
    })
    .into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, cookie_header(&cookie)?);
    Ok(response)
}

pub async fn logout_handler() -> ApiResult<impl IntoResponse> {
    let cookie = Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::hours(-1))
        .same_site(SameSite::Lax)
        .http_only(true)
        .build();

    let mut response = Json(json!({"status": "success"})).into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, cookie_header(&cookie)?);
    Ok(response)
}

pub async fn get_me_handler(
    State(data): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(auth.id)
        .fetch_optional(&data.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(UserResponse {
        status: "success",
        user: FilteredUser::from(&user),
    }))
}

fn cookie_header(cookie: &Cookie<'_>) -> ApiResult<HeaderValue> {
    HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| ApiError::Internal(format!("Invalid cookie header: {e}")))
}
