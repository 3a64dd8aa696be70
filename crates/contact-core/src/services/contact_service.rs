//! Contact directory service: add and search, scoped to the session's user

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{Contact, ContactQuery, NewContact, Session, UserId};
use crate::error::DomainError;
use crate::repositories::ContactRepository;

pub struct ContactService<R: ContactRepository + ?Sized> {
    contact_repo: Arc<R>,
}

impl<R: ContactRepository + ?Sized> ContactService<R> {
    pub fn new(contact_repo: Arc<R>) -> Self {
        Self { contact_repo }
    }

    /// Adds `name` to `owner`'s contacts. Duplicates are allowed.
    pub async fn add(
        &self,
        session: &Session,
        owner: UserId,
        name: &str,
    ) -> Result<Contact, DomainError> {
        authorize(session, owner)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::ValidationError("Contact name is required".to_string()));
        }

        let contact = self
            .contact_repo
            .create(&NewContact {
                owner_user_id: owner,
                name: name.to_string(),
            })
            .await?;

        info!("Contact {} added for user {}", contact.id, owner);
        Ok(contact)
    }

    /// Names of `owner`'s contacts matching `search`; blank returns them all.
    pub async fn search(
        &self,
        session: &Session,
        owner: UserId,
        search: &str,
    ) -> Result<Vec<String>, DomainError> {
        authorize(session, owner)?;

        let query = ContactQuery::parse(search);
        let contacts = self.contact_repo.search(owner, &query).await?;
        debug!("Search for user {} matched {} contacts", owner, contacts.len());

        Ok(contacts.into_iter().map(|c| c.name).collect())
    }
}

fn authorize(session: &Session, owner: UserId) -> Result<(), DomainError> {
    if owner <= 0 || !session.owns(owner) {
        warn!(
            "Session for user {} attempted access to user {}",
            session.user_id, owner
        );
        return Err(DomainError::Unauthorized(owner));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockContactRepository;
    use chrono::{Duration, Utc};

    fn session(user_id: UserId) -> Session {
        Session {
            user_id,
            first_name: "Thomas".to_string(),
            last_name: "Anderson".to_string(),
            expires_at: Utc::now() + Duration::minutes(20),
        }
    }

    fn contact(id: i32, owner: UserId, name: &str) -> Contact {
        Contact {
            id,
            owner_user_id: owner,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_trims_and_stores() {
        let mut repo = MockContactRepository::new();
        repo.expect_create()
            .withf(|c: &NewContact| c.owner_user_id == 3 && c.name == "Trinity")
            .times(1)
            .returning(|c| Ok(c.clone().into_contact(1)));

        let service = ContactService::new(Arc::new(repo));
        let added = service.add(&session(3), 3, "  Trinity ").await.unwrap();
        assert_eq!(added.name, "Trinity");
    }

    #[tokio::test]
    async fn test_add_rejects_blank_name() {
        let mut repo = MockContactRepository::new();
        repo.expect_create().never();

        let service = ContactService::new(Arc::new(repo));
        let result = service.add(&session(3), 3, "   ").await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_foreign_owner_is_unauthorized() {
        let mut repo = MockContactRepository::new();
        repo.expect_create().never();
        repo.expect_search().never();

        let service = ContactService::new(Arc::new(repo));
        assert!(matches!(
            service.add(&session(3), 4, "Trinity").await,
            Err(DomainError::Unauthorized(4))
        ));
        assert!(matches!(
            service.search(&session(3), 4, "").await,
            Err(DomainError::Unauthorized(4))
        ));
    }

    #[tokio::test]
    async fn test_blank_search_requests_all() {
        let mut repo = MockContactRepository::new();
        repo.expect_search()
            .withf(|owner, query| *owner == 3 && *query == ContactQuery::All)
            .returning(|owner, _| {
                Ok(vec![contact(1, owner, "Trinity"), contact(2, owner, "Morpheus")])
            });

        let service = ContactService::new(Arc::new(repo));
        let names = service.search(&session(3), 3, "").await.unwrap();
        assert_eq!(names, vec!["Trinity", "Morpheus"]);
    }

    #[tokio::test]
    async fn test_search_passes_lowercased_needle() {
        let mut repo = MockContactRepository::new();
        repo.expect_search()
            .withf(|_, query| *query == ContactQuery::Containing("al".to_string()))
            .returning(|owner, _| Ok(vec![contact(5, owner, "Alice")]));

        let service = ContactService::new(Arc::new(repo));
        let names = service.search(&session(3), 3, " AL ").await.unwrap();
        assert_eq!(names, vec!["Alice"]);
    }
}
