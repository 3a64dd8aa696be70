//! Password hashing with Argon2, with verification of legacy bcrypt hashes

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Unrecognized hash format")]
    UnknownFormat,
}

/// Scheme a stored hash was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    Argon2,
    /// `$2y$`/`$2b$`/`$2a$` rows written by the PHP backend's `password_hash`.
    Bcrypt,
}

impl HashScheme {
    pub fn detect(hash: &str) -> Option<Self> {
        if hash.starts_with("$argon2") {
            Some(HashScheme::Argon2)
        } else if hash.starts_with("$2y$") || hash.starts_with("$2b$") || hash.starts_with("$2a$") {
            Some(HashScheme::Bcrypt)
        } else {
            None
        }
    }
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        match HashScheme::detect(hash) {
            Some(HashScheme::Argon2) => {
                let parsed_hash = PasswordHash::new(hash)
                    .map_err(|e| PasswordError::HashError(e.to_string()))?;
                Ok(Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok())
            }
            Some(HashScheme::Bcrypt) => bcrypt::verify(password, hash)
                .map_err(|e| PasswordError::HashError(e.to_string())),
            None => Err(PasswordError::UnknownFormat),
        }
    }

    /// True when the stored hash should be replaced by a fresh Argon2 hash.
    pub fn needs_rehash(hash: &str) -> bool {
        HashScheme::detect(hash) != Some(HashScheme::Argon2)
    }
}
