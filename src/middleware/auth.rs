use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

use crate::{
    dto::auth::Claims,
    entity::enums::Role,
    error::AppError,
    state::AppState,
};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// The authenticated principal attached to a request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

/// Allows the call only when the principal holds one of `allowed`.
pub fn ensure_role(user: &AuthUser, allowed: &[Role]) -> Result<(), AppError> {
    if !allowed.contains(&user.role) {
        tracing::debug!(user_id = %user.user_id, role = user.role.as_str(), "role not permitted");
        return Err(AppError::Forbidden(format!(
            "{} accounts may not perform this action",
            user.role.as_str()
        )));
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, &[Role::Admin])
}

pub fn ensure_consumer(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, &[Role::Consumer])
}

pub fn ensure_company(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, &[Role::Company])
}

pub fn decode_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    let user_id = Uuid::parse_str(&decoded.claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

    Ok(AuthUser {
        user_id,
        role: decoded.claims.role,
    })
}

/// Bearer header first, then the session cookie.
fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let auth_str = value
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;
        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?
            .trim();
        if token.is_empty() {
            return Err(AppError::Unauthorized("Missing token".into()));
        }
        return Ok(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == ACCESS_TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
        .ok_or_else(|| AppError::Unauthorized("Missing token".into()))
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)?;
        let app_state = AppState::from_ref(state);
        decode_token(&token, &app_state.config.jwt_secret)
    }
}
