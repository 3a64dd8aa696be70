//! User repository trait (port)

use async_trait::async_trait;
use crate::domain::{NewUser, User, UserId};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError>;

    /// Inserts in a single store operation. A login that is already taken
    /// yields `DomainError::LoginAlreadyExists` and writes nothing.
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    async fn update_password(&self, id: UserId, password_hash: &str) -> Result<(), DomainError>;
}
