// ============================================================================
// Contact Core - Authentication Service
// File: crates/contact-core/src/services/auth_service.rs
// ============================================================================
//! Authentication service with login, register, and session issuing

use std::sync::{Arc, OnceLock};
use contact_security::{IssuedToken, PasswordService};
use contact_shared::utils::mask_login;
use tracing::{info, warn, error};

use crate::domain::{NewUser, User, UserProfile};
use crate::error::DomainError;
use crate::repositories::UserRepository;
use crate::services::SessionService;

/// Authentication service for handling user login/register flows
pub struct AuthService<R: UserRepository + ?Sized> {
    user_repo: Arc<R>,
    sessions: Arc<SessionService>,
}

/// Registration input, already schema-checked by the caller
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub password: String,
}

/// Result of a successful login or registration
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: UserProfile,
    pub session: IssuedToken,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(user_repo: Arc<R>, sessions: Arc<SessionService>) -> Self {
        Self { user_repo, sessions }
    }

    /// Login with login identifier and password
    pub async fn login(&self, login: &str, password: &str) -> Result<AuthResult, DomainError> {
        let masked = mask_login(login);
        info!("Login attempt for: {}", masked);

        // 1. Find user by login
        let Some(user) = self.user_repo.find_by_login(login).await? else {
            // Spend the same hashing work as a wrong password would
            verify_against_dummy(password).await;
            warn!("Login failed: unknown login: {}", masked);
            return Err(DomainError::InvalidCredentials);
        };

        // 2. Verify password
        let password_valid = verify_password(password, &user.password_hash).await?;
        if !password_valid {
            warn!("Login failed: invalid password for: {}", masked);
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Upgrade legacy hashes
        if PasswordService::needs_rehash(&user.password_hash) {
            self.upgrade_hash(&user, password).await;
        }

        // 4. Issue session
        let profile = user.profile();
        let session = self.sessions.start(&profile)?;

        info!("Login successful for user {}", profile.id);
        Ok(AuthResult { user: profile, session })
    }

    /// Register a new user
    pub async fn register(&self, command: RegisterCommand) -> Result<AuthResult, DomainError> {
        let masked = mask_login(&command.login);
        info!("Registration attempt for: {}", masked);

        // 1. Hash password
        let password_hash = hash_password(command.password).await?;

        // 2. Insert; the store enforces login uniqueness
        let new_user = NewUser {
            first_name: command.first_name,
            last_name: command.last_name,
            login: command.login,
            password_hash,
        };
        let created = self.user_repo.create(&new_user).await.map_err(|e| {
            match &e {
                DomainError::LoginAlreadyExists(_) => {
                    warn!("Registration failed: login already exists: {}", masked)
                }
                other => error!("Registration failed for {}: {}", masked, other),
            }
            e
        })?;

        // 3. Issue session
        let profile = created.profile();
        let session = self.sessions.start(&profile)?;

        info!("Registration successful for user {}", profile.id);
        Ok(AuthResult { user: profile, session })
    }

    async fn upgrade_hash(&self, user: &User, password: &str) {
        let upgraded = match hash_password(password.to_string()).await {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to re-hash password for user {}: {}", user.id, e);
                return;
            }
        };
        match self.user_repo.update_password(user.id, &upgraded).await {
            Ok(()) => info!("Upgraded password hash for user {}", user.id),
            // Don't fail login for this
            Err(e) => error!("Failed to store upgraded hash for user {}: {}", user.id, e),
        }
    }
}

async fn hash_password(password: String) -> Result<String, DomainError> {
    tokio::task::spawn_blocking(move || PasswordService::hash(&password))
        .await
        .map_err(|e| DomainError::InternalError(e.to_string()))?
        .map_err(|e| DomainError::PasswordHashError(e.to_string()))
}

async fn verify_password(password: &str, hash: &str) -> Result<bool, DomainError> {
    let password = password.to_string();
    let hash = hash.to_string();
    let verified = tokio::task::spawn_blocking(move || PasswordService::verify(&password, &hash))
        .await
        .map_err(|e| DomainError::InternalError(e.to_string()))?;
    match verified {
        Ok(valid) => Ok(valid),
        Err(e) => {
            // An unreadable stored hash must look like any other failure
            error!("Stored password hash unusable: {}", e);
            Ok(false)
        }
    }
}

/// Argon2 hash of a throwaway secret, verified against on unknown logins.
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

async fn verify_against_dummy(password: &str) {
    let password = password.to_string();
    let outcome = tokio::task::spawn_blocking(move || {
        let hash = DUMMY_HASH.get_or_init(|| {
            PasswordService::hash("unknown-login-placeholder").unwrap_or_default()
        });
        PasswordService::verify(&password, hash)
    })
    .await;
    if let Ok(Err(e)) = outcome {
        error!("Dummy password verification failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockUserRepository;

    fn sessions() -> Arc<SessionService> {
        Arc::new(SessionService::new("test-secret", 1200))
    }

    fn command(login: &str) -> RegisterCommand {
        RegisterCommand {
            first_name: "Thomas".to_string(),
            last_name: "Anderson".to_string(),
            login: login.to_string(),
            password: "there-is-no-spoon".to_string(),
        }
    }

    fn stored(id: i32, login: &str, password_hash: String) -> User {
        User {
            id,
            first_name: "Thomas".to_string(),
            last_name: "Anderson".to_string(),
            login: login.to_string(),
            password_hash,
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_returns_new_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|u: &NewUser| {
                u.login == "neo"
                    && u.password_hash.starts_with("$argon2")
                    && u.password_hash != "there-is-no-spoon"
            })
            .times(1)
            .returning(|u| Ok(u.clone().into_user(17)));

        let service = AuthService::new(Arc::new(repo), sessions());
        let result = service.register(command("neo")).await.unwrap();

        assert_eq!(result.user.id, 17);
        assert_eq!(result.user.first_name, "Thomas");
        assert!(!result.session.token.is_empty());
    }

    #[tokio::test]
    async fn test_register_conflict_is_surfaced() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|u| Err(DomainError::LoginAlreadyExists(u.login.clone())));

        let service = AuthService::new(Arc::new(repo), sessions());
        let result = service.register(command("neo")).await;

        assert!(matches!(result, Err(DomainError::LoginAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let hash = PasswordService::hash("there-is-no-spoon").unwrap();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login()
            .withf(|login: &str| login == "neo")
            .returning(move |login| Ok(Some(stored(5, login, hash.clone()))));
        repo.expect_update_password().never();

        let service = AuthService::new(Arc::new(repo), sessions());
        let result = service.login("neo", "there-is-no-spoon").await.unwrap();

        assert_eq!(result.user.id, 5);
        assert_eq!(result.user.last_name, "Anderson");
    }

    #[tokio::test]
    async fn test_unknown_login_and_wrong_password_are_indistinguishable() {
        let hash = PasswordService::hash("there-is-no-spoon").unwrap();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login().returning(move |login| {
            if login == "neo" {
                Ok(Some(stored(5, login, hash.clone())))
            } else {
                Ok(None)
            }
        });

        let service = AuthService::new(Arc::new(repo), sessions());
        let wrong_password = service.login("neo", "spoon").await.unwrap_err();
        let unknown_login = service.login("smith", "spoon").await.unwrap_err();

        assert!(matches!(wrong_password, DomainError::InvalidCredentials));
        assert!(matches!(unknown_login, DomainError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_login.to_string());
    }

    #[tokio::test]
    async fn test_unknown_login_still_verifies_a_hash() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repo), sessions());
        let started = std::time::Instant::now();
        let result = service.login("smith", "spoon").await;

        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
        assert!(DUMMY_HASH.get().is_some_and(|h| h.starts_with("$argon2")));
        assert!(started.elapsed() >= std::time::Duration::from_millis(1));
    }

    #[tokio::test]
    async fn test_legacy_bcrypt_login_upgrades_hash() {
        let legacy = bcrypt::hash("zion1999", 4).unwrap().replacen("$2b$", "$2y$", 1);
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login()
            .returning(move |login| Ok(Some(stored(8, login, legacy.clone()))));
        repo.expect_update_password()
            .withf(|id, hash| *id == 8 && hash.starts_with("$argon2"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = AuthService::new(Arc::new(repo), sessions());
        let result = service.login("morpheus", "zion1999").await.unwrap();
        assert_eq!(result.user.id, 8);
    }

    #[tokio::test]
    async fn test_failed_hash_upgrade_does_not_fail_login() {
        let legacy = bcrypt::hash("zion1999", 4).unwrap();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login()
            .returning(move |login| Ok(Some(stored(8, login, legacy.clone()))));
        repo.expect_update_password()
            .returning(|_, _| Err(DomainError::DatabaseError("read only".to_string())));

        let service = AuthService::new(Arc::new(repo), sessions());
        assert!(service.login("morpheus", "zion1999").await.is_ok());
    }

    #[tokio::test]
    async fn test_store_outage_propagates() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_login()
            .returning(|_| Err(DomainError::StoreUnavailable("connection refused".to_string())));

        let service = AuthService::new(Arc::new(repo), sessions());
        let result = service.login("neo", "whatever").await;
        assert!(matches!(result, Err(DomainError::StoreUnavailable(_))));
    }
}
