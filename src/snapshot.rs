//! Typed parsing of raw wallet documents.
//!
//! The upstream document store is loosely typed: numeric fields show up as
//! numbers or numeric strings, and flags or parties may be absent entirely.
//! These converters turn a raw document into a typed record, defaulting
//! missing values the way the aggregation expects (absent amounts count as
//! zero, absent flags as non-discounted) and failing only when a document has
//! no usable identity.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::Amount;
use crate::model::{AccountId, AccountRecord, TopUp, Transfer};

/// Errors raised while converting a raw export document.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("document is not a JSON object")]
    NotAnObject,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),
}

/// Parse an account document: `uid` plus its stored `wallet_value`.
pub fn account_from_doc(doc: &Value) -> Result<AccountRecord, SnapshotError> {
    let doc = object(doc)?;
    let uid = field_uid(doc, "uid").ok_or(SnapshotError::MissingField("uid"))?;

    Ok(AccountRecord {
        uid,
        total_balance: field_amount(doc, "wallet_value"),
    })
}

/// Parse a top-up document, returning the owning account's uid alongside the
/// event.
pub fn top_up_from_doc(doc: &Value) -> Result<(AccountId, TopUp), SnapshotError> {
    let doc = object(doc)?;
    let uid = field_uid(doc, "uid").ok_or(SnapshotError::MissingField("uid"))?;

    Ok((
        uid,
        TopUp {
            amount: field_amount(doc, "card_value"),
            discounted: field_bool(doc, "is_discounted"),
        },
    ))
}

/// Parse a transfer document. Either party may be absent; direction is
/// resolved later against the account under evaluation.
pub fn transfer_from_doc(doc: &Value) -> Result<Transfer, SnapshotError> {
    let doc = object(doc)?;

    Ok(Transfer {
        amount: field_amount(doc, "wallet_value"),
        discounted: field_bool(doc, "is_discounted"),
        sender: field_uid(doc, "sender_uid"),
        receiver: field_uid(doc, "receiver_uid"),
    })
}

fn object(doc: &Value) -> Result<&Map<String, Value>, SnapshotError> {
    doc.as_object().ok_or(SnapshotError::NotAnObject)
}

/// Numeric field, tolerating numbers, numeric strings, and absence.
fn field_amount(doc: &Map<String, Value>, key: &str) -> Amount {
    match doc.get(key) {
        Some(Value::Number(n)) => n.as_f64().map(Amount::from_float).unwrap_or(Amount::ZERO),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Amount::from_float)
            .unwrap_or(Amount::ZERO),
        _ => Amount::ZERO,
    }
}

fn field_bool(doc: &Map<String, Value>, key: &str) -> bool {
    doc.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Identity field: a non-empty string, or nothing.
fn field_uid(doc: &Map<String, Value>, key: &str) -> Option<AccountId> {
    doc.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn account_parses_uid_and_balance() {
        let doc = json!({ "uid": "driver-1", "wallet_value": 125.5 });
        let record = account_from_doc(&doc).unwrap();
        assert_eq!(record.uid, "driver-1");
        assert_eq!(record.total_balance, Amount::from_float(125.5));
    }

    #[test]
    fn account_balance_defaults_to_zero() {
        let doc = json!({ "uid": "driver-1" });
        let record = account_from_doc(&doc).unwrap();
        assert_eq!(record.total_balance, Amount::ZERO);
    }

    #[test]
    fn account_without_uid_is_an_error() {
        let doc = json!({ "wallet_value": 10 });
        let err = account_from_doc(&doc).unwrap_err();
        assert!(matches!(err, SnapshotError::MissingField("uid")));
    }

    #[test]
    fn non_object_document_is_an_error() {
        let err = account_from_doc(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, SnapshotError::NotAnObject));
    }

    #[test]
    fn top_up_parses_owner_and_event() {
        let doc = json!({ "uid": "driver-1", "card_value": 50, "is_discounted": true });
        let (uid, top_up) = top_up_from_doc(&doc).unwrap();
        assert_eq!(uid, "driver-1");
        assert_eq!(top_up.amount, Amount::from_float(50.0));
        assert!(top_up.discounted);
    }

    #[test]
    fn top_up_defaults_missing_fields() {
        let doc = json!({ "uid": "driver-1" });
        let (_, top_up) = top_up_from_doc(&doc).unwrap();
        assert_eq!(top_up.amount, Amount::ZERO);
        assert!(!top_up.discounted);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let doc = json!({ "uid": "driver-1", "card_value": "12.75" });
        let (_, top_up) = top_up_from_doc(&doc).unwrap();
        assert_eq!(top_up.amount, Amount::from_float(12.75));
    }

    #[test]
    fn unparseable_amounts_default_to_zero() {
        let doc = json!({ "uid": "driver-1", "card_value": "n/a" });
        let (_, top_up) = top_up_from_doc(&doc).unwrap();
        assert_eq!(top_up.amount, Amount::ZERO);
    }

    #[test]
    fn transfer_parses_both_parties() {
        let doc = json!({
            "sender_uid": "driver-1",
            "receiver_uid": "driver-2",
            "wallet_value": 30,
            "is_discounted": false
        });
        let transfer = transfer_from_doc(&doc).unwrap();
        assert_eq!(transfer.sender.as_deref(), Some("driver-1"));
        assert_eq!(transfer.receiver.as_deref(), Some("driver-2"));
        assert_eq!(transfer.amount, Amount::from_float(30.0));
    }

    #[test]
    fn transfer_tolerates_missing_parties() {
        let doc = json!({ "wallet_value": 5 });
        let transfer = transfer_from_doc(&doc).unwrap();
        assert!(transfer.sender.is_none());
        assert!(transfer.receiver.is_none());
    }

    #[test]
    fn empty_uid_strings_count_as_absent() {
        let doc = json!({ "sender_uid": "", "receiver_uid": "driver-2", "wallet_value": 5 });
        let transfer = transfer_from_doc(&doc).unwrap();
        assert!(transfer.sender.is_none());
        assert_eq!(transfer.receiver.as_deref(), Some("driver-2"));
    }
}
