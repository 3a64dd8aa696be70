//! Session state derived from a signed session token

use chrono::{DateTime, Utc};
use contact_security::SessionClaims;

use super::user::{UserId, UserProfile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Builds a session only when every field is present and usable:
    /// a positive user id and non-empty names.
    pub fn from_claims(claims: SessionClaims) -> Option<Self> {
        let user_id: UserId = claims.sub.parse().ok()?;
        if user_id <= 0 || claims.first_name.is_empty() || claims.last_name.is_empty() {
            return None;
        }
        let expires_at = claims.expires_at()?;
        Some(Self {
            user_id,
            first_name: claims.first_name,
            last_name: claims.last_name,
            expires_at,
        })
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.user_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    pub fn owns(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn(Session),
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::LoggedIn(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::LoggedIn(session) => Some(session),
            SessionState::LoggedOut => None,
        }
    }
}
