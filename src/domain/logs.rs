//! Log classification, filtering, and display rows.

use chrono::{DateTime, Local, Utc};

use crate::api::LogEntry;

/// Transaction-type discriminators recognized by the filter.
const TX_REGISTER: &str = "REGISTER";
const TX_VERIFY: &str = "VERIFY";

/// Placeholder when no registration entry supplies a medicine name or batch.
pub const PLACEHOLDER: &str = "N/A";

/// Classified transaction kind of a kept log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Registration,
    Verification,
}

impl TxKind {
    pub fn status_label(&self) -> &'static str {
        match self {
            TxKind::Registration => "Registered",
            TxKind::Verification => "Verified",
        }
    }

    pub fn actor_label(&self) -> &'static str {
        match self {
            TxKind::Registration => "Manufacturer",
            TxKind::Verification => "Pharmacist",
        }
    }
}

/// One displayable row: the seven-column shape shared by the table and the
/// PDF export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub date: String,
    pub time: String,
    pub medicine: String,
    pub batch: String,
    pub status: &'static str,
    pub actor: &'static str,
    pub hash: String,
}

/// Classify an entry, or `None` if the filter drops it.
///
/// Kept iff: a REGISTER entry with both name and batch non-empty, or a
/// VERIFY entry with an explicit found value.
fn classify(entry: &LogEntry) -> Option<TxKind> {
    match entry.tx.kind.as_deref() {
        Some(TX_REGISTER)
            if non_empty(entry.tx.name.as_deref()) && non_empty(entry.tx.batch.as_deref()) =>
        {
            Some(TxKind::Registration)
        }
        Some(TX_VERIFY) if entry.tx.found.is_some() => Some(TxKind::Verification),
        _ => None,
    }
}

fn non_empty(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Build display rows from a fetched log list.
///
/// Verification rows take their medicine name and batch from the first
/// registration entry of the list; every entry in one response shares the
/// queried tag id, so that entry describes the same batch. With no
/// registration entry the placeholder is used.
pub fn build_rows(entries: &[LogEntry]) -> Vec<LogRow> {
    let fallback = entries
        .iter()
        .find(|entry| classify(entry) == Some(TxKind::Registration))
        .map(|entry| {
            (
                entry.tx.name.clone().unwrap_or_default(),
                entry.tx.batch.clone().unwrap_or_default(),
            )
        });
    let (fallback_name, fallback_batch) = fallback
        .unwrap_or_else(|| (PLACEHOLDER.to_string(), PLACEHOLDER.to_string()));

    entries
        .iter()
        .filter_map(|entry| {
            let kind = classify(entry)?;
            let (medicine, batch) = match kind {
                TxKind::Registration => (
                    entry.tx.name.clone().unwrap_or_default(),
                    entry.tx.batch.clone().unwrap_or_default(),
                ),
                TxKind::Verification => (fallback_name.clone(), fallback_batch.clone()),
            };

            Some(LogRow {
                date: local_date(&entry.timestamp),
                time: local_time(&entry.timestamp),
                medicine,
                batch,
                status: kind.status_label(),
                actor: kind.actor_label(),
                hash: entry.hash.clone(),
            })
        })
        .collect()
}

/// Date component of a timestamp in the viewer's local time zone.
pub fn local_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Time component of a timestamp in the viewer's local time zone.
pub fn local_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(raw: serde_json::Value) -> LogEntry {
        serde_json::from_value(raw).unwrap()
    }

    fn register_entry(name: &str, batch: &str) -> LogEntry {
        entry(serde_json::json!({
            "id": 1,
            "timestamp": 1_735_689_600_000_i64,
            "hash": "0xreg",
            "tx": {"type": "REGISTER", "name": name, "batch": batch}
        }))
    }

    fn verify_entry(found: bool) -> LogEntry {
        entry(serde_json::json!({
            "id": 2,
            "timestamp": 1_735_693_200_000_i64,
            "hash": "0xver",
            "tx": {"type": "VERIFY", "found": found}
        }))
    }

    #[test]
    fn filter_keeps_only_well_formed_entries() {
        let entries = vec![
            register_entry("Aspirin", "B-1"),
            verify_entry(true),
            // REGISTER missing batch: dropped.
            entry(serde_json::json!({
                "id": 3,
                "timestamp": 1_735_689_600_000_i64,
                "hash": "0x3",
                "tx": {"type": "REGISTER", "name": "Aspirin"}
            })),
            // REGISTER with empty name: dropped.
            entry(serde_json::json!({
                "id": 4,
                "timestamp": 1_735_689_600_000_i64,
                "hash": "0x4",
                "tx": {"type": "REGISTER", "name": "", "batch": "B-1"}
            })),
            // VERIFY without an explicit found value: dropped.
            entry(serde_json::json!({
                "id": 5,
                "timestamp": 1_735_689_600_000_i64,
                "hash": "0x5",
                "tx": {"type": "VERIFY"}
            })),
            // Unknown discriminator: dropped.
            entry(serde_json::json!({
                "id": 6,
                "timestamp": 1_735_689_600_000_i64,
                "hash": "0x6",
                "tx": {"type": "MINT"}
            })),
            // No tx at all: dropped.
            entry(serde_json::json!({
                "id": 7,
                "timestamp": 1_735_689_600_000_i64,
                "hash": "0x7"
            })),
        ];

        let rows = build_rows(&entries);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, "Registered");
        assert_eq!(rows[1].status, "Verified");
    }

    #[test]
    fn verification_rows_inherit_name_and_batch_from_registration() {
        let entries = vec![verify_entry(true), register_entry("Aspirin", "B-1")];
        let rows = build_rows(&entries);

        assert_eq!(rows[0].status, "Verified");
        assert_eq!(rows[0].medicine, "Aspirin");
        assert_eq!(rows[0].batch, "B-1");
        assert_eq!(rows[0].actor, "Pharmacist");
    }

    #[test]
    fn placeholder_used_when_no_registration_entry_exists() {
        let entries = vec![verify_entry(true), verify_entry(false)];
        let rows = build_rows(&entries);

        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.medicine, PLACEHOLDER);
            assert_eq!(row.batch, PLACEHOLDER);
        }
    }

    #[test]
    fn timestamps_render_in_local_time_zone() {
        let timestamp = Utc.with_ymd_and_hms(2025, 6, 15, 23, 45, 10).unwrap();
        let local = timestamp.with_timezone(&Local);

        assert_eq!(local_date(&timestamp), local.format("%Y-%m-%d").to_string());
        assert_eq!(local_time(&timestamp), local.format("%H:%M:%S").to_string());
    }
}
