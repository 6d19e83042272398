//! Ledger backend over a directory of exported documents.
//!
//! Expects three files in the export directory, each a JSON array of raw
//! documents as the admin export produces them:
//!
//! - `accounts.json` - account records with stored totals
//! - `top_ups.json` - card redemptions, owned by a `uid`
//! - `transfers.json` - peer-to-peer moves between accounts
//!
//! Everything is parsed up front through the snapshot converters; fetches
//! never touch the filesystem.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use super::{LedgerError, LedgerSource};
use crate::model::{AccountId, AccountRecord, TopUp, Transfer};
use crate::snapshot;

#[derive(Debug)]
pub struct JsonLedger {
    accounts: Vec<AccountRecord>,
    top_ups: HashMap<AccountId, Vec<TopUp>>,
    transfers: Vec<Transfer>,
}

impl JsonLedger {
    /// Load an export directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let dir = dir.as_ref();

        let accounts = parse_docs(&dir.join("accounts.json"), snapshot::account_from_doc)?;

        let mut top_ups: HashMap<AccountId, Vec<TopUp>> = HashMap::new();
        for (uid, top_up) in parse_docs(&dir.join("top_ups.json"), snapshot::top_up_from_doc)? {
            top_ups.entry(uid).or_default().push(top_up);
        }

        let transfers = parse_docs(&dir.join("transfers.json"), snapshot::transfer_from_doc)?;

        info!(
            accounts = accounts.len(),
            top_ups = top_ups.values().map(Vec::len).sum::<usize>(),
            transfers = transfers.len(),
            "ledger export loaded"
        );

        Ok(Self {
            accounts,
            top_ups,
            transfers,
        })
    }
}

/// Read one export file and convert every document in it.
fn parse_docs<T>(
    path: &Path,
    convert: impl Fn(&Value) -> Result<T, snapshot::SnapshotError>,
) -> Result<Vec<T>, LedgerError> {
    let raw = fs::read_to_string(path).map_err(|source| LedgerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| LedgerError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(docs) = value else {
        return Err(LedgerError::NotAnArray {
            path: path.to_path_buf(),
        });
    };

    docs.iter()
        .enumerate()
        .map(|(index, doc)| {
            convert(doc).map_err(|source| LedgerError::Snapshot {
                path: path.to_path_buf(),
                index,
                source,
            })
        })
        .collect()
}

#[async_trait]
impl LedgerSource for JsonLedger {
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
