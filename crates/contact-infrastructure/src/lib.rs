//! # Contact Infrastructure
//!
//! Credential and contact store implementations (adapters).

pub mod database;
pub mod memory;

pub use database::{create_pool, run_migrations, MySqlContactRepository, MySqlUserRepository};
pub use memory::MemoryStore;
