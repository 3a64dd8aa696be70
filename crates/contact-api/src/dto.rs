//! Request and response bodies. Field names are part of the wire contract.

use serde::{Deserialize, Serialize};
use validator::Validate;

use contact_core::domain::UserProfile;

use crate::response::ErrorEnvelope;

/// POST /Register
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,
    #[validate(length(min = 3, max = 50, message = "User ID must be 3-50 characters"))]
    pub login: String,
    #[validate(length(min = 6, max = 100, message = "Access code must be 6-100 characters"))]
    pub password: String,
}

/// POST /Login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50, message = "User ID must be 1-50 characters"))]
    pub login: String,
    #[validate(length(min = 1, max = 100, message = "Access code must be 1-100 characters"))]
    pub password: String,
}

/// POST /AddContact
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddContactRequest {
    #[validate(length(min = 1, max = 50, message = "Contact name must be 1-50 characters"))]
    pub contact: String,
    #[validate(range(min = 1, message = "Valid user ID is required"))]
    pub user_id: i32,
}

/// POST /SearchContacts
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchContactsRequest {
    #[validate(length(max = 50, message = "Search text too long"))]
    pub search: String,
    #[validate(range(min = 1, message = "Valid user ID is required"))]
    pub user_id: i32,
}

/// Login, Register and Session reply. `id > 0` exactly when `error` is empty.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub error: String,
    /// Session token for clients that cannot rely on the cookie.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthResponse {
    pub fn success(user: &UserProfile, token: Option<String>) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            error: String::new(),
            token,
        }
    }
}

impl ErrorEnvelope for AuthResponse {
    fn from_error(message: String) -> Self {
        Self {
            id: 0,
            first_name: String::new(),
            last_name: String::new(),
            error: message,
            token: None,
        }
    }
}

/// AddContact and Logout reply
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub error: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { error: String::new() }
    }
}

impl ErrorEnvelope for StatusResponse {
    fn from_error(message: String) -> Self {
        Self { error: message }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchContactsResponse {
    pub results: Vec<String>,
    pub error: String,
}

impl ErrorEnvelope for SearchContactsResponse {
    fn from_error(message: String) -> Self {
        Self {
            results: Vec::new(),
            error: message,
        }
    }
}
