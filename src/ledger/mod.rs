//! Ledger access.
//!
//! [`LedgerSource`] is the seam between the reconciliation core and whatever
//! holds the wallet history. Implementations own completeness: the reconciler
//! assumes the returned lists are the account's full history, so pagination
//! and retry concerns live behind this trait, never in front of it.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{AccountRecord, TopUp, Transfer};
use crate::snapshot::SnapshotError;

mod json;
mod memory;

pub use json::JsonLedger;
pub use memory::InMemoryLedger;

/// Errors surfaced by a ledger backend.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid document export: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not hold a JSON array of documents", path.display())]
    NotAnArray { path: PathBuf },

    #[error("{}, document {index}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        index: usize,
        #[source]
        source: SnapshotError,
    },
}

/// Read access to accounts, their stored totals, and their wallet history.
#[async_trait]
pub trait LedgerSource {
    /// All known accounts, in a stable order.
    async fn accounts(&self) -> Result<Vec<AccountRecord>, LedgerError>;

    /// One account's stored record, if the account exists.
    async fn account(&self, uid: &str) -> Result<Option<AccountRecord>, LedgerError>;

    /// Every top-up credited to the account.
    async fn top_ups(&self, uid: &str) -> Result<Vec<TopUp>, LedgerError>;

    /// Every transfer naming the account as sender or receiver.
    async fn transfers(&self, uid: &str) -> Result<Vec<Transfer>, LedgerError>;
}
