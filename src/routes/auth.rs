use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{AppendHeaders, IntoResponse},
    routing::post,
};

use crate::{
    dto::auth::{SignInRequest, SignInResponse, SignUpRequest},
    error::AppResult,
    extract::AppJson,
    middleware::auth::ACCESS_TOKEN_COOKIE,
    models::User,
    response::{ApiResponse, Meta},
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .route("/sign-out", post(sign_out))
}

pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{ACCESS_TOKEN_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age_secs}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Register a consumer or company", body = ApiResponse<User>),
        (status = 400, description = "Missing fields or email already registered")
    ),
    tag = "Auth"
)]
pub async fn sign_up(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignUpRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let resp = auth_service::sign_up(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Issue a session token, also set as the access_token cookie", body = ApiResponse<SignInResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn sign_in(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignInRequest>,
) -> AppResult<impl IntoResponse> {
    let resp = auth_service::sign_in(&state, payload).await?;
    let cookie = resp
        .data
        .as_ref()
        .map(|data| session_cookie(&data.token, data.expires_in, state.config.cookie_secure))
        .unwrap_or_default();
    Ok((AppendHeaders([(header::SET_COOKIE, cookie)]), Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    responses(
        (status = 200, description = "Clear the session cookie", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Auth"
)]
pub async fn sign_out(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = session_cookie("", 0, state.config.cookie_secure);
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(ApiResponse::success(
            "Sign Out Success",
            serde_json::json!({}),
            Some(Meta::empty()),
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_carries_token_and_flags() {
        let cookie = session_cookie("abc", 3600, false);
        assert!(cookie.starts_with("access_token=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(!cookie.contains("Secure"));
        assert!(session_cookie("abc", 3600, true).ends_with("; Secure"));
    }
}
