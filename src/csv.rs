use serde::Serialize;
use std::io;

use crate::model::WalletSummary;

/// One exported summary row. Amounts go out as currency strings, not raw
/// scaled integers.
#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    uid: &'a str,
    actual_balance: String,
    added_balance: String,
    total_balance: String,
}

/// Write wallet summaries as csv.
pub fn write_summaries<'a, W: io::Write>(
    writer: W,
    summaries: impl IntoIterator<Item = &'a WalletSummary>,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for summary in summaries {
        let row = OutputRow {
            uid: &summary.uid,
            actual_balance: summary.actual_balance.to_string(),
            added_balance: summary.added_balance.to_string(),
            total_balance: summary.total_balance.to_string(),
        };
        writer.serialize(&row)?;
    }

    writer.flush()?;
    Ok(())
}
