pub mod memory;
pub mod postgres;

pub use memory::{MemorySurveyStore, StoredSurvey};
pub use postgres::{DatabaseSettings, PostgresSurveyStore};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::survey::SurveyRecord;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Persists finished survey records. Implementations are shared across
/// requests and must handle concurrent inserts on their own.
#[async_trait]
pub trait SurveyStore: Send + Sync {
    /// Store `record` and return the id it was saved under.
    async fn insert_record(&self, record: &SurveyRecord) -> Result<Uuid>;
}
