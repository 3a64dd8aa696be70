//! Database module (MySQL adapters)

pub mod connection;
pub mod errors;
pub mod mysql;

pub use connection::{create_pool, run_migrations, PoolOptions};
pub use mysql::{MySqlContactRepository, MySqlUserRepository};
