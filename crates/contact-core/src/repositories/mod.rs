//! Repository traits (ports)

pub mod user_repository;
pub mod contact_repository;

pub use user_repository::UserRepository;
pub use contact_repository::ContactRepository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use contact_repository::MockContactRepository;
