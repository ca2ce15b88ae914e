//! Boundary with the storage that holds entry lines and accounts.
//!
//! Reports never call the source themselves: the query service fetches one
//! [`LedgerSnapshot`] per query and hands it to the pure aggregators.

pub mod error;
pub mod snapshot;

pub use error::SourceError;
pub use snapshot::{LedgerSnapshot, RecordKind, SourceRejection};

use crate::ledger::{RawAccount, RawEntryLine, RawExercise};

/// Asynchronous supplier of stored ledger records.
///
/// Records come back as stored, in any of their field spellings; the snapshot
/// normalizes them.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait EntryLineSource: Send + Sync {
    /// Returns every stored entry line.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::StorageUnavailable`] if the storage cannot be read.
    async fn get_all_entry_lines(&self) -> Result<Vec<RawEntryLine>, SourceError>;

    /// Returns the chart of accounts.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::StorageUnavailable`] if the storage cannot be read.
    async fn get_all_accounts(&self) -> Result<Vec<RawAccount>, SourceError>;

    /// Returns the exercises. Sources without exercise records return none.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::StorageUnavailable`] if the storage cannot be read.
    async fn get_all_exercises(&self) -> Result<Vec<RawExercise>, SourceError> {
        Ok(Vec::new())
    }
}
