//! Contract envelope: every reply is `200 OK` with the outcome in `error`.

use axum::Json;
use serde::Serialize;

use crate::error::ApiError;

/// A reply body that can carry a failure in its `error` field.
pub trait ErrorEnvelope: Serialize {
    fn from_error(message: String) -> Self;
}

/// Renders a handler outcome. `fallback` is the public message used for
/// failures whose detail must stay internal.
pub fn respond<R: ErrorEnvelope>(result: Result<R, ApiError>, fallback: &str) -> Json<R> {
    match result {
        Ok(body) => Json(body),
        Err(e) => Json(R::from_error(e.public_message(fallback))),
    }
}
