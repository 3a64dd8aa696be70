use thiserror::Error;
use validator::ValidationErrors;

use contact_core::error::DomainError;

pub const INVALID_CREDENTIALS: &str = "Invalid neural ID or access code";
pub const LOGIN_TAKEN: &str = "Neural ID already exists in the grid";
pub const NOT_AUTHORIZED: &str = "Neural link not authorized";
pub const UNKNOWN_USER: &str = "Unknown neural ID";
pub const UNAVAILABLE: &str = "Neural grid temporarily unavailable";
pub const SESSION_EXPIRED: &str = "Session expired";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid {}", field),
                })
            })
            .collect();
        messages.sort();
        ApiError::BadRequest(messages.join("; "))
    }
}

impl ApiError {
    /// Text placed in the reply's `error` field. Internal detail is logged
    /// here and replaced by `fallback` or a generic message.
    pub fn public_message(&self, fallback: &str) -> String {
        match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                msg.clone()
            }
            ApiError::Domain(e) => match e {
                DomainError::InvalidCredentials => INVALID_CREDENTIALS.to_string(),
                DomainError::LoginAlreadyExists(_) => LOGIN_TAKEN.to_string(),
                DomainError::Unauthorized(_) => NOT_AUTHORIZED.to_string(),
                DomainError::UserNotFound => UNKNOWN_USER.to_string(),
                DomainError::ValidationError(msg) => {
                    tracing::warn!("Validation error: {}", msg);
                    msg.clone()
                }
                DomainError::StoreUnavailable(msg) => {
                    tracing::error!("Store unavailable: {}", msg);
                    UNAVAILABLE.to_string()
                }
                DomainError::DatabaseError(msg)
                | DomainError::PasswordHashError(msg)
                | DomainError::TokenGenerationError(msg)
                | DomainError::InternalError(msg) => {
                    tracing::error!("Internal error: {}", msg);
                    fallback.to_string()
                }
            },
        }
    }
}
