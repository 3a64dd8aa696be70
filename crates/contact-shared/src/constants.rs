//! Application-wide constants

pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 1200;
pub const DEFAULT_SESSION_COOKIE: &str = "session";
pub const DEVELOPMENT_SESSION_SECRET: &str = "neural-grid-development-secret";
pub const MEMORY_DATABASE_URL: &str = "memory://";

