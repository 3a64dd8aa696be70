//! # Contact Core - Domain Module
//!
//! Domain entities for the contact directory.

pub mod user;
pub mod contact;
pub mod session;

pub use user::{NewUser, User, UserId, UserProfile};
pub use contact::{Contact, ContactQuery, NewContact};
pub use session::{Session, SessionState};
