//! Wallet summary service.
//!
//! The boundary between ledger access and presentation: fetches an account's
//! stored record and history, reconciles them, and reports summaries. The
//! ledger backend and the shortfall policy are injected once at construction.

use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::ledger::LedgerSource;
use crate::model::{AccountId, ShortfallPolicy, WalletSummary};
use crate::recon::reconcile;

mod error;
pub use error::SummaryError;

pub struct WalletService<L> {
    ledger: L,
    policy: ShortfallPolicy,
}

impl<L: LedgerSource> WalletService<L> {
    pub fn new(ledger: L, policy: ShortfallPolicy) -> Self {
        Self { ledger, policy }
    }

    /// Compute the balance split for one account.
    ///
    /// Fails only when the account is unknown or a fetch fails; the
    /// reconciliation itself always produces a valid split.
    pub async fn summary(&self, uid: &str) -> Result<WalletSummary, SummaryError> {
        let record = self
            .ledger
            .account(uid)
            .await?
            .ok_or_else(|| SummaryError::AccountNotFound(uid.to_string()))?;

        // The two history fetches are independent; issue them together.
        let (top_ups, transfers) =
            tokio::join!(self.ledger.top_ups(uid), self.ledger.transfers(uid));
        let (top_ups, transfers) = (top_ups?, transfers?);

        // An account-scoped fetch should never return rows that name the
        // account on neither side; such rows are ignored downstream but are
        // worth flagging as a data-quality problem.
        let stray = transfers.iter().filter(|t| t.role(uid).is_none()).count();
        if stray > 0 {
            warn!(
                account = %uid,
                count = stray,
                "fetched transfers name the account on neither side"
            );
        }

        let split = reconcile(&top_ups, &transfers, record.total_balance, uid, self.policy);

        Ok(WalletSummary {
            uid: record.uid,
            actual_balance: split.actual,
            added_balance: split.added,
            total_balance: record.total_balance,
        })
    }

    /// Compute summaries for a stream of account ids.
    ///
    /// A failing account is logged and skipped; it never stops the run.
    pub async fn summarize(
        &self,
        mut accounts: impl Stream<Item = AccountId> + Unpin,
    ) -> Vec<WalletSummary> {
        let mut summaries = Vec::new();

        while let Some(uid) = accounts.next().await {
            match self.summary(&uid).await {
                Ok(summary) => {
                    info!(
                        account = %summary.uid,
                        actual = %summary.actual_balance,
                        added = %summary.added_balance,
                        total = %summary.total_balance,
                        "summary computed"
                    );
                    summaries.push(summary);
                }
                Err(e) => {
                    warn!(account = %uid, reason = %e, "summary skipped");
                }
            }
        }

        summaries
    }
}
