use std::sync::Arc;

use contact_core::repositories::{ContactRepository, UserRepository};
use contact_core::services::{AuthService, ContactService, SessionService};
use contact_shared::config::SessionSettings;

/// Session cookie attributes
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<dyn UserRepository>>,
    pub contacts: Arc<ContactService<dyn ContactRepository>>,
    pub sessions: Arc<SessionService>,
    pub cookie: CookieSettings,
}

impl AppState {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        contact_repo: Arc<dyn ContactRepository>,
        settings: &SessionSettings,
    ) -> Self {
        let sessions = Arc::new(SessionService::new(&settings.secret, settings.ttl_seconds));
        Self {
            auth: Arc::new(AuthService::new(user_repo, sessions.clone())),
            contacts: Arc::new(ContactService::new(contact_repo)),
            sessions,
            cookie: CookieSettings {
                name: settings.cookie_name.clone(),
                secure: settings.secure_cookie,
            },
        }
    }
}
