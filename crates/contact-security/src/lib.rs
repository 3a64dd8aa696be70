//! # Contact Security
//!
//! Security utilities: password hashing and signed session tokens.

pub mod jwt;
pub mod password;

pub use jwt::{IssuedToken, JwtError, JwtService, SessionClaims};
pub use password::{PasswordError, PasswordService};
