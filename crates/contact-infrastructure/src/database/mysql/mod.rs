//! MySQL repository implementations

pub mod user_repo_impl;
pub mod contact_repo_impl;

pub use user_repo_impl::MySqlUserRepository;
pub use contact_repo_impl::MySqlContactRepository;
