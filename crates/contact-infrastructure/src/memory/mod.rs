//! In-process store used for local runs (`database.url = "memory://"`) and tests.
//!
//! One lock guards users and contacts together, so the login uniqueness check
//! and the insert happen atomically, like the unique index in MySQL.

use async_trait::async_trait;
use tokio::sync::RwLock;

use contact_core::domain::{Contact, ContactQuery, NewContact, NewUser, User, UserId};
use contact_core::error::DomainError;
use contact_core::repositories::{ContactRepository, UserRepository};

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    contacts: Vec<Contact>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(any(test, feature = "test-util"))]
    pub async fn count_users_with_login(&self, login: &str) -> usize {
        self.state.read().await.users.iter().filter(|u| u.login == login).count()
    }
}

fn next_id(len: usize) -> Result<i32, DomainError> {
    i32::try_from(len + 1).map_err(|_| DomainError::InternalError("id space exhausted".to_string()))
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.login == login).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.login == user.login) {
            return Err(DomainError::LoginAlreadyExists(user.login.clone()));
        }
        let created = user.clone().into_user(next_id(state.users.len())?);
        state.users.push(created.clone());
        Ok(created)
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(DomainError::UserNotFound)?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for MemoryStore {
    async fn create(&self, contact: &NewContact) -> Result<Contact, DomainError> {
        let mut state = self.state.write().await;
        if !state.users.iter().any(|u| u.id == contact.owner_user_id) {
            return Err(DomainError::UserNotFound);
        }
        let created = contact.clone().into_contact(next_id(state.contacts.len())?);
        state.contacts.push(created.clone());
        Ok(created)
    }

    async fn search(&self, owner: UserId, query: &ContactQuery) -> Result<Vec<Contact>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .contacts
            .iter()
            .filter(|c| c.owner_user_id == owner && query.matches(&c.name))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_user(login: &str) -> NewUser {
        NewUser {
            first_name: "Thomas".to_string(),
            last_name: "Anderson".to_string(),
            login: login.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    async fn add(store: &MemoryStore, owner: UserId, name: &str) {
        ContactRepository::create(
            store,
            &NewContact {
                owner_user_id: owner,
                name: name.to_string(),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_login_rejected() {
        let store = MemoryStore::new();
        let first = UserRepository::create(&store, &new_user("neo")).await.unwrap();
        assert_eq!(first.id, 1);

        let second = UserRepository::create(&store, &new_user("neo")).await;
        assert!(matches!(second, Err(DomainError::LoginAlreadyExists(_))));
        assert_eq!(store.count_users_with_login("neo").await, 1);
    }

    #[tokio::test]
    async fn test_login_is_case_sensitive() {
        let store = MemoryStore::new();
        UserRepository::create(&store, &new_user("neo")).await.unwrap();
        assert!(UserRepository::create(&store, &new_user("NEO")).await.is_ok());
        assert!(store.find_by_login("Neo").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_has_single_winner() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                UserRepository::create(store.as_ref(), &new_user("oracle")).await
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(store.count_users_with_login("oracle").await, 1);
    }

    #[tokio::test]
    async fn test_search_scoped_to_owner() {
        let store = MemoryStore::new();
        let neo = UserRepository::create(&store, &new_user("neo")).await.unwrap();
        let smith = UserRepository::create(&store, &new_user("smith")).await.unwrap();
        add(&store, neo.id, "Trinity").await;
        add(&store, neo.id, "Alice").await;
        add(&store, smith.id, "Sally").await;
        add(&store, neo.id, "Malachai").await;

        let all = store.search(neo.id, &ContactQuery::All).await.unwrap();
        let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Trinity", "Alice", "Malachai"]);

        let al = store.search(neo.id, &ContactQuery::parse("al")).await.unwrap();
        let names: Vec<_> = al.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Malachai"]);
    }

    #[tokio::test]
    async fn test_contact_for_unknown_owner_rejected() {
        let store = MemoryStore::new();
        let result = ContactRepository::create(
            &store,
            &NewContact {
                owner_user_id: 99,
                name: "Ghost".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(DomainError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_update_password() {
        let store = MemoryStore::new();
        let user = UserRepository::create(&store, &new_user("neo")).await.unwrap();
        store.update_password(user.id, "$argon2id$new").await.unwrap();

        let reloaded = store.find_by_login("neo").await.unwrap().unwrap();
        assert_eq!(reloaded.password_hash, "$argon2id$new");
        assert!(matches!(
            store.update_password(404, "x").await,
            Err(DomainError::UserNotFound)
        ));
    }
}
