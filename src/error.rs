//! Error types for a populate run.

use thiserror::Error;

/// Errors that terminate a populate run.
///
/// None of these are retried. The run aborts at the failing stage and rows
/// already committed stay in the table; there is no rollback path.
#[derive(Debug, Error)]
pub enum PopulateError {
    /// Opening or authenticating a session failed.
    #[error("failed to open MySQL session: {0:#}")]
    Connection(anyhow::Error),

    /// Dropping or creating the target table failed.
    #[error("failed to create table `{table}`: {source:#}")]
    SchemaCreation { table: String, source: anyhow::Error },

    /// A batched INSERT statement failed.
    #[error("batch insert into `{table}` failed: {source:#}")]
    Insert { table: String, source: anyhow::Error },

    /// A worker task panicked or was cancelled before finishing its share.
    #[error("worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
