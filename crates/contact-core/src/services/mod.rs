//! Domain services (business logic)

pub mod auth_service;
pub mod contact_service;
pub mod session_service;

pub use auth_service::{AuthResult, AuthService, RegisterCommand};
pub use contact_service::ContactService;
pub use session_service::SessionService;
