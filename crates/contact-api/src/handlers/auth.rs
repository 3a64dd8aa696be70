// ============================================================================
// Contact API - Auth Handlers
// File: crates/contact-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (register, login, logout)

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
    Json,
};

use contact_core::services::{AuthResult, RegisterCommand};

use crate::dto::{AuthResponse, LoginRequest, RegisterRequest, StatusResponse};
use crate::error::{ApiError, UNAVAILABLE};
use crate::extract::{clear_session_cookie, session_cookie, validated};
use crate::response::respond;
use crate::state::AppState;

const REGISTER_FAILED: &str = "Failed to create neural link";

/// Register handler - POST /Register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let result = try_register(&state, payload).await;
    auth_reply(&state, result, REGISTER_FAILED)
}

/// Login handler - POST /Login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let result = try_login(&state, payload).await;
    auth_reply(&state, result, UNAVAILABLE)
}

/// Logout handler - POST /Logout
pub async fn logout(State(state): State<AppState>) -> Response {
    (
        [(SET_COOKIE, clear_session_cookie(&state.cookie))],
        Json(StatusResponse::ok()),
    )
        .into_response()
}

async fn try_register(
    state: &AppState,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<AuthResult, ApiError> {
    let request = validated(payload)?;
    let command = RegisterCommand {
        first_name: request.first_name,
        last_name: request.last_name,
        login: request.login,
        password: request.password,
    };
    Ok(state.auth.register(command).await?)
}

async fn try_login(
    state: &AppState,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<AuthResult, ApiError> {
    let request = validated(payload)?;
    Ok(state.auth.login(&request.login, &request.password).await?)
}

/// Successful auth sets the session cookie and returns the token in the body.
fn auth_reply(state: &AppState, result: Result<AuthResult, ApiError>, fallback: &str) -> Response {
    match result {
        Ok(auth) => {
            let cookie = session_cookie(&state.cookie, &auth.session.token, state.sessions.ttl_seconds());
            let body = AuthResponse::success(&auth.user, Some(auth.session.token));
            ([(SET_COOKIE, cookie)], Json(body)).into_response()
        }
        Err(e) => respond::<AuthResponse>(Err(e), fallback).into_response(),
    }
}
