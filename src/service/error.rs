//! Error types for wallet summaries.

use thiserror::Error;

use crate::ledger::LedgerError;
use crate::model::AccountId;

/// Error returned by [`WalletService::summary`](super::WalletService::summary).
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    #[error("ledger fetch failed: {0}")]
    Ledger(#[from] LedgerError),
}
