//! Current session lookup - GET /Session

use axum::Json;

use contact_core::domain::SessionState;

use crate::dto::AuthResponse;
use crate::error::SESSION_EXPIRED;
use crate::extract::CurrentSession;
use crate::response::ErrorEnvelope;

pub async fn current_session(CurrentSession(state): CurrentSession) -> Json<AuthResponse> {
    match state {
        SessionState::LoggedIn(session) => Json(AuthResponse::success(&session.profile(), None)),
        SessionState::LoggedOut => Json(AuthResponse::from_error(SESSION_EXPIRED.to_string())),
    }
}
