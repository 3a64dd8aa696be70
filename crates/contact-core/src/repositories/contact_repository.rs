//! Contact repository trait (port)

use async_trait::async_trait;
use crate::domain::{Contact, ContactQuery, NewContact, UserId};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Fails with `DomainError::UserNotFound` when the owner does not exist.
    async fn create(&self, contact: &NewContact) -> Result<Contact, DomainError>;

    /// Contacts of `owner` matching `query`, in insertion order.
    async fn search(&self, owner: UserId, query: &ContactQuery) -> Result<Vec<Contact>, DomainError>;
}
