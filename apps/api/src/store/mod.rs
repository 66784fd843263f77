//! District store — the read-only seam between the recommendation core and persistence.
//!
//! The core never assumes server-side fuzzy search: it bulk-fetches candidates
//! (optionally narrowed by state) and does the matching itself.
//!
//! `AppState` holds an `Arc<dyn DistrictStore>`; Postgres in production, the
//! in-memory store in tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::district::District;

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[cfg(test)]
pub use memory::InMemoryDistrictStore;
pub use postgres::PgDistrictStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("corrupt record for district '{district}': {reason}")]
    Corrupt { district: String, reason: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait DistrictStore: Send + Sync {
    /// Fetches every district (with its carriers), restricted to `state` when given.
    /// State codes compare case-insensitively.
    async fn find_districts_by_state(&self, state: Option<&str>)
        -> Result<Vec<District>, StoreError>;
}

impl From<sqlx::Error> for StoreError {
    /// Connection-level failures mean the store is unreachable, not that a query was wrong.
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_query_error_stays_a_database_error() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(_)));
    }
}
