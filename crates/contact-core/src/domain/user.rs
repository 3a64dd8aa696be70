//! User domain entity

use serde::{Deserialize, Serialize};

/// Store-assigned user identifier. Valid identifiers are strictly positive.
pub type UserId = i32;

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Unique, compared case-sensitively.
    pub login: String,
    pub password_hash: String,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

/// A user that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            login: self.login,
            password_hash: self.password_hash,
        }
    }
}

/// Minimal profile returned by login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
}
