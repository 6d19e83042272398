//! Core domain types for wallet reconciliation.

use crate::Amount;

/// Account identifier: the uid of a driver or passenger.
pub type AccountId = String;

/// A prepaid-card redemption crediting an account's wallet.
///
/// The upstream documents carry more (timestamps, card and batch linkage,
/// redemption codes); none of it participates in the balance split, so it is
/// not modeled here.
#[derive(Debug, Clone)]
pub struct TopUp {
    /// Currency value credited to the wallet.
    pub amount: Amount,
    /// True when the credit came from a promotional/discounted card.
    pub discounted: bool,
}

/// A peer-to-peer movement of wallet value between two accounts.
#[derive(Debug, Clone)]
pub struct Transfer {
    /// Magnitude of the money moved; always non-negative.
    pub amount: Amount,
    /// True when the moved value is promotional rather than paid money.
    pub discounted: bool,
    /// Sending account, when recorded.
    pub sender: Option<AccountId>,
    /// Receiving account, when recorded.
    pub receiver: Option<AccountId>,
}

/// Which side of a [`Transfer`] an account is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferRole {
    Sender,
    Receiver,
}

impl Transfer {
    /// The given account's role in this transfer, or `None` when the transfer
    /// names it on neither side. Receiver wins if a row names the same account
    /// on both sides, mirroring the order the ledger query matches in.
    pub fn role(&self, account: &str) -> Option<TransferRole> {
        if self.receiver.as_deref() == Some(account) {
            Some(TransferRole::Receiver)
        } else if self.sender.as_deref() == Some(account) {
            Some(TransferRole::Sender)
        } else {
            None
        }
    }
}

/// The stored, trusted total balance for an account.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub uid: AccountId,
    pub total_balance: Amount,
}

/// Split of a wallet total into real money and promotional credit.
///
/// Both components are non-negative, cent-rounded, and never sum to more than
/// the authoritative total they were reconciled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSplit {
    /// Portion attributable to money actually paid.
    pub actual: Amount,
    /// Portion attributable to promotions and credits.
    pub added: Amount,
}

impl BalanceSplit {
    pub const ZERO: BalanceSplit = BalanceSplit {
        actual: Amount::ZERO,
        added: Amount::ZERO,
    };
}

/// Per-account view handed to the presentation and export layers.
#[derive(Debug, Clone)]
pub struct WalletSummary {
    pub uid: AccountId,
    pub actual_balance: Amount,
    pub added_balance: Amount,
    pub total_balance: Amount,
}

/// Where an under-counted shortfall (stored total above the event history's
/// sum) is attributed.
///
/// The default treats untracked credits as real money, which is what the
/// cashout-bearing account type needs; `Added` is the conservative reading
/// that treats them as promotional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortfallPolicy {
    /// Attribute the shortfall to the actual (real money) balance.
    #[default]
    Actual,
    /// Attribute the shortfall to the added (promotional) balance.
    Added,
}
