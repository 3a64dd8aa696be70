// ============================================================================
// Contact Infrastructure - MySQL User Repository
// File: crates/contact-infrastructure/src/database/mysql/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, MySqlPool};
use tracing::{info, error};

use contact_core::domain::{NewUser, User, UserId};
use contact_core::error::DomainError;
use contact_core::repositories::UserRepository;

use crate::database::errors::{is_unique_violation, map_sqlx_error};

pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    #[sqlx(rename = "ID")]
    pub id: i32,
    #[sqlx(rename = "FirstName")]
    pub first_name: String,
    #[sqlx(rename = "LastName")]
    pub last_name: String,
    #[sqlx(rename = "Login")]
    pub login: String,
    #[sqlx(rename = "Password")]
    pub password: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            login: row.login,
            password_hash: row.password,
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT ID, FirstName, LastName, Login, Password
            FROM Users
            WHERE Login = ?
            "#
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding user by login: {}", e);
            map_sqlx_error(e)
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO Users (FirstName, LastName, Login, Password)
            VALUES (?, ?, ?, ?)
            "#
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.login)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            if is_unique_violation(&e) {
                DomainError::LoginAlreadyExists(user.login.clone())
            } else {
                error!("Database error creating user: {}", e);
                map_sqlx_error(e)
            }
        })?;

        let id = UserId::try_from(result.last_insert_id())
            .map_err(|e| DomainError::DatabaseError(format!("user id out of range: {}", e)))?;

        info!("User created successfully: {}", id);
        Ok(user.clone().into_user(id))
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE Users
            SET Password = ?
            WHERE ID = ?
            "#
        )
        .bind(password_hash)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating password: {}", e);
            map_sqlx_error(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound);
        }
        Ok(())
    }
}
