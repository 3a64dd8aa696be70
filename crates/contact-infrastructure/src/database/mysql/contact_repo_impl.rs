//! MySQL contact repository

use async_trait::async_trait;
use sqlx::{FromRow, MySqlPool};
use tracing::{error, warn};

use contact_core::domain::{Contact, ContactQuery, NewContact, UserId};
use contact_core::error::DomainError;
use contact_core::repositories::ContactRepository;

use crate::database::errors::{is_foreign_key_violation, map_sqlx_error};

pub struct MySqlContactRepository {
    pool: MySqlPool,
}

impl MySqlContactRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContactRow {
    #[sqlx(rename = "ID")]
    pub id: i32,
    #[sqlx(rename = "UserID")]
    pub user_id: i32,
    #[sqlx(rename = "Name")]
    pub name: String,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: row.id,
            owner_user_id: row.user_id,
            name: row.name,
        }
    }
}

#[async_trait]
impl ContactRepository for MySqlContactRepository {
    async fn create(&self, contact: &NewContact) -> Result<Contact, DomainError> {
        let result = sqlx::query("INSERT INTO Contacts (UserID, Name) VALUES (?, ?)")
            .bind(contact.owner_user_id)
            .bind(&contact.name)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                if is_foreign_key_violation(&e) {
                    warn!("Contact insert for unknown user {}", contact.owner_user_id);
                    DomainError::UserNotFound
                } else {
                    error!("Database error creating contact: {}", e);
                    map_sqlx_error(e)
                }
            })?;

        let id = i32::try_from(result.last_insert_id())
            .map_err(|e| DomainError::DatabaseError(format!("contact id out of range: {}", e)))?;

        Ok(contact.clone().into_contact(id))
    }

    async fn search(&self, owner: UserId, query: &ContactQuery) -> Result<Vec<Contact>, DomainError> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            r#"
            SELECT ID, UserID, Name
            FROM Contacts
            WHERE UserID = ? AND LOWER(Name) LIKE ? ESCAPE '!'
            ORDER BY ID ASC
            "#
        )
        .bind(owner)
        .bind(query.like_pattern())
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error searching contacts: {}", e);
            map_sqlx_error(e)
        })?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }
}
