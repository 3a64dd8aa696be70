//! Request extraction: validated JSON payloads and the caller's session.

use axum::{
    extract::{rejection::JsonRejection, FromRequestParts},
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap,
    },
    Json,
};
use std::convert::Infallible;
use validator::Validate;

use contact_core::domain::{Session, SessionState, UserId};
use contact_core::error::DomainError;

use crate::error::ApiError;
use crate::state::{AppState, CookieSettings};

/// Unwraps a JSON body and checks it against its schema before any
/// business logic sees it.
pub fn validated<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    request.validate()?;
    Ok(request)
}

/// Session state of the caller, re-derived from the presented token.
pub struct CurrentSession(pub SessionState);

impl CurrentSession {
    /// The session, provided it belongs to `user_id`.
    pub fn require(&self, user_id: UserId) -> Result<&Session, ApiError> {
        match &self.0 {
            SessionState::LoggedIn(session) if session.owns(user_id) => Ok(session),
            _ => Err(DomainError::Unauthorized(user_id).into()),
        }
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers, &state.cookie.name);
        Ok(CurrentSession(state.sessions.resume(token.as_deref())))
    }
}

/// Bearer token if present, otherwise the session cookie.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());
    if bearer.is_some() {
        return bearer;
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.to_string())
}

pub fn session_cookie(settings: &CookieSettings, token: &str, max_age: i64) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax{}",
        settings.name,
        token,
        max_age,
        if settings.secure { "; Secure" } else { "" }
    )
}

pub fn clear_session_cookie(settings: &CookieSettings) -> String {
    format!(
        "{}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite=Lax{}",
        settings.name,
        if settings.secure { "; Secure" } else { "" }
    )
}
