//! Session issuing and resumption

use contact_security::{IssuedToken, JwtError, JwtService};
use tracing::debug;

use crate::domain::{Session, SessionState, UserProfile};
use crate::error::DomainError;

pub struct SessionService {
    jwt: JwtService,
}

impl SessionService {
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            jwt: JwtService::new(secret, ttl_seconds),
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.jwt.ttl_seconds()
    }

    /// LoggedOut -> LoggedIn
    pub fn start(&self, profile: &UserProfile) -> Result<IssuedToken, DomainError> {
        self.jwt
            .issue(profile.id, &profile.first_name, &profile.last_name)
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))
    }

    /// Re-derives the state from a presented token. Anything short of a
    /// fully valid token is LoggedOut.
    pub fn resume(&self, token: Option<&str>) -> SessionState {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return SessionState::LoggedOut;
        };
        match self.jwt.validate(token) {
            Ok(claims) => match Session::from_claims(claims) {
                Some(session) => SessionState::LoggedIn(session),
                None => {
                    debug!("Session token carries incomplete identity");
                    SessionState::LoggedOut
                }
            },
            Err(JwtError::TokenExpired) => {
                debug!("Session token expired");
                SessionState::LoggedOut
            }
            Err(e) => {
                debug!("Session token rejected: {}", e);
                SessionState::LoggedOut
            }
        }
    }
}
