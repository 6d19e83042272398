//! Wallet balance reconciliation.
//!
//! Splits an account's authoritative total balance into its "actual" (paid
//! money) and "added" (promotional credit) portions, derived from the
//! account's top-up and transfer history. The stored total always wins: the
//! split never claims more than it, however incomplete the history is.

use tracing::warn;

use crate::Amount;
use crate::model::{BalanceSplit, ShortfallPolicy, TopUp, Transfer, TransferRole};

/// Gap between the calculated and stored totals above which a warning is
/// emitted. Persistent large gaps point at an upstream data-integrity issue.
const DISCREPANCY_TOLERANCE: Amount = Amount::from_scaled(100); // one cent

/// Reconcile an account's event history against its authoritative total.
///
/// Total over its inputs: empty histories, zero totals, and transfers that do
/// not involve `account` all produce a valid split, never a panic. Both
/// returned components are non-negative, rounded to cents, and sum to at most
/// `total_balance` (up to cent rounding).
pub fn reconcile(
    top_ups: &[TopUp],
    transfers: &[Transfer],
    total_balance: Amount,
    account: &str,
    policy: ShortfallPolicy,
) -> BalanceSplit {
    let (raw_actual, raw_added) = aggregate(top_ups, transfers, account);
    let calculated = raw_actual + raw_added;

    let gap = if calculated >= total_balance {
        calculated - total_balance
    } else {
        total_balance - calculated
    };
    if gap > DISCREPANCY_TOLERANCE {
        warn!(
            account = %account,
            calculated = %calculated,
            stored = %total_balance,
            raw_actual = %raw_actual,
            raw_added = %raw_added,
            top_ups = top_ups.len(),
            transfers = transfers.len(),
            "wallet balance discrepancy"
        );
    }

    // The stored total is authoritative; with nothing to distribute every
    // clamp below collapses to zero anyway.
    if total_balance <= Amount::ZERO {
        return BalanceSplit::ZERO;
    }

    let (actual, added) = if calculated > total_balance && calculated > Amount::ZERO {
        // History overcounts the stored total (e.g. debits the query missed):
        // scale both categories down, preserving their ratio.
        (
            raw_actual.scale(total_balance, calculated),
            raw_added.scale(total_balance, calculated),
        )
    } else if calculated < total_balance {
        // History undercounts (e.g. untracked admin adjustments): the
        // shortfall goes to the configured category.
        let shortfall = total_balance - calculated;
        match policy {
            ShortfallPolicy::Actual => (raw_actual + shortfall, raw_added),
            ShortfallPolicy::Added => (raw_actual, raw_added + shortfall),
        }
    } else {
        (raw_actual, raw_added)
    };

    // Final clamps: neither component may exceed the stored total, and the
    // two together may not either.
    let actual = actual.min(total_balance).max(Amount::ZERO);
    let added = added.min(total_balance - actual).max(Amount::ZERO);

    BalanceSplit {
        actual: actual.round_to_cents(),
        added: added.round_to_cents(),
    }
}

/// Raw per-category sums over the event history.
///
/// Top-ups credit their category. Transfers credit the receiving account and
/// debit the sending one; rows that name `account` on neither side contribute
/// nothing. Each category is clamped at zero afterwards: debits can never
/// push a category's ledger negative.
fn aggregate(top_ups: &[TopUp], transfers: &[Transfer], account: &str) -> (Amount, Amount) {
    let mut actual = Amount::ZERO;
    let mut added = Amount::ZERO;

    for top_up in top_ups {
        if top_up.discounted {
            added += top_up.amount;
        } else {
            actual += top_up.amount;
        }
    }

    for transfer in transfers {
        match transfer.role(account) {
            Some(TransferRole::Receiver) => {
                if transfer.discounted {
                    added += transfer.amount;
                } else {
                    actual += transfer.amount;
                }
            }
            Some(TransferRole::Sender) => {
                if transfer.discounted {
                    added -= transfer.amount;
                } else {
                    actual -= transfer.amount;
                }
            }
            None => {}
        }
    }

    (actual.max(Amount::ZERO), added.max(Amount::ZERO))
}
