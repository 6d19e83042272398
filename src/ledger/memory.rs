//! In-memory ledger backend with a deterministic fake-data factory.

use std::collections::HashMap;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{LedgerError, LedgerSource};
use crate::Amount;
use crate::model::{AccountId, AccountRecord, TopUp, Transfer};

/// Ledger held entirely in memory. Used by tests and as the demo backend of
/// the ops binary.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    /// Insertion order is the listing order.
    accounts: Vec<AccountRecord>,
    top_ups: HashMap<AccountId, Vec<TopUp>>,
    transfers: Vec<Transfer>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account record.
    pub fn insert_account(&mut self, record: AccountRecord) {
        match self.accounts.iter_mut().find(|a| a.uid == record.uid) {
            Some(existing) => *existing = record,
            None => self.accounts.push(record),
        }
    }

    pub fn insert_top_up(&mut self, uid: &str, top_up: TopUp) {
        self.top_ups.entry(uid.to_string()).or_default().push(top_up);
    }

    pub fn insert_transfer(&mut self, transfer: Transfer) {
        self.transfers.push(transfer);
    }

    /// Build a fake ledger of `accounts` accounts from a seed.
    ///
    /// Same seed, same ledger. Every generated account is self-consistent:
    /// one paid and one promotional top-up whose sum is the stored total, so
    /// reconciliation reproduces the generated split exactly.
    pub fn seeded(accounts: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ledger = Self::new();

        for n in 1..=accounts {
            let uid = format!("driver-{n:04}");
            // Cent-aligned values: up to 1000.00 paid, up to 200.00 promotional
            let actual = Amount::from_scaled(rng.gen_range(0..=100_000i64) * 100);
            let added = Amount::from_scaled(rng.gen_range(0..=20_000i64) * 100);

            ledger.insert_account(AccountRecord {
                uid: uid.clone(),
                total_balance: actual + added,
            });
            ledger.insert_top_up(
                &uid,
                TopUp {
                    amount: actual,
                    discounted: false,
                },
            );
            ledger.insert_top_up(
                &uid,
                TopUp {
                    amount: added,
                    discounted: true,
                },
            );
        }

        ledger
    }
}

#[async_trait]
impl LedgerSource for InMemoryLedger {
    async fn accounts(&self) -> Result<Vec<AccountRecord>, LedgerError> {
        Ok(self.accounts.clone())
    }

    async fn account(&self, uid: &str) -> Result<Option<AccountRecord>, LedgerError> {
        Ok(self.accounts.iter().find(|a| a.uid == uid).cloned())
    }

    async fn top_ups(&self, uid: &str) -> Result<Vec<TopUp>, LedgerError> {
        Ok(self.top_ups.get(uid).cloned().unwrap_or_default())
    }

    async fn transfers(&self, uid: &str) -> Result<Vec<Transfer>, LedgerError> {
        Ok(self
            .transfers
            .iter()
            .filter(|t| t.role(uid).is_some())
            .cloned()
            .collect())
    }
}
