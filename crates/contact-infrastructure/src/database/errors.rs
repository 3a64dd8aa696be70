//! sqlx error classification

use contact_core::error::DomainError;
use sqlx::Error;

/// Maps driver errors that are not constraint violations. Connectivity
/// problems are kept apart so the API can hide them behind a generic message.
pub fn map_sqlx_error(e: Error) -> DomainError {
    match e {
        Error::PoolTimedOut | Error::PoolClosed | Error::Io(_) | Error::Tls(_) => {
            DomainError::StoreUnavailable(e.to_string())
        }
        other => DomainError::DatabaseError(other.to_string()),
    }
}

pub fn is_unique_violation(e: &Error) -> bool {
    matches!(e, Error::Database(db) if db.is_unique_violation())
}

pub fn is_foreign_key_violation(e: &Error) -> bool {
    matches!(e, Error::Database(db) if db.is_foreign_key_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_unavailable() {
        assert!(matches!(
            map_sqlx_error(Error::PoolTimedOut),
            DomainError::StoreUnavailable(_)
        ));
    }

    #[test]
    fn test_row_not_found_is_database_error() {
        assert!(matches!(
            map_sqlx_error(Error::RowNotFound),
            DomainError::DatabaseError(_)
        ));
        assert!(!is_unique_violation(&Error::RowNotFound));
        assert!(!is_foreign_key_violation(&Error::RowNotFound));
    }
}
