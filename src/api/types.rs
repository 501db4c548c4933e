//! Request and response types for the PharmaChain API.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Body for `POST /api/register/{role}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterAccountRequest {
    pub name: String,
    pub license_no: String,
    pub email: String,
    pub password: String,
}

/// Body for `POST /api/login/{role}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from `POST /api/login/{role}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
}

/// Body for `POST /api/medicine/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterMedicineRequest {
    pub name: String,
    pub batch: String,
    pub expiry: String,
    pub manufacturer: String,
}

/// Response from `POST /api/medicine/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterMedicineResponse {
    pub tag_id: String,
}

/// Body for `POST /api/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyRequest {
    pub tag_id: String,
}

/// Response from `POST /api/verify`.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    pub found: bool,
    #[serde(default)]
    pub medicine: Option<Medicine>,
}

/// Medicine fields as returned by the verification endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub batch: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub manufacturer: String,
}

/// Response from `GET /api/blockchain/logs/{tag_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

/// Error body some endpoints return alongside a non-2xx status.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// One recorded blockchain event for a tag id.
#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub tx: TxRecord,
}

/// Transaction payload carried by a log entry.
///
/// Kept as an open record: entries with unknown `type` values or missing
/// fields must survive deserialization so the domain filter can drop them,
/// rather than failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TxRecord {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub found: Option<bool>,
}

/// Accept timestamps as either epoch milliseconds or an RFC 3339 string.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Millis(i64),
        Text(String),
    }

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| serde::de::Error::custom("timestamp out of range")),
        RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_logs_with_mixed_tx_shapes() {
        let raw = r#"{
            "logs": [
                {
                    "id": 1,
                    "timestamp": 1735689600000,
                    "hash": "0xabc",
                    "tx": {"type": "REGISTER", "name": "Aspirin", "batch": "B-1"}
                },
                {
                    "id": "evt-2",
                    "timestamp": "2025-01-01T12:30:00Z",
                    "hash": "0xdef",
                    "tx": {"type": "VERIFY", "found": true}
                },
                {
                    "id": 3,
                    "timestamp": 1735689700000,
                    "hash": "0x123",
                    "tx": {"type": "MINT", "amount": 5}
                }
            ]
        }"#;

        let response: LogsResponse = serde_json::from_str(raw).expect("logs should parse");
        assert_eq!(response.logs.len(), 3);

        let first = &response.logs[0];
        assert_eq!(first.tx.kind.as_deref(), Some("REGISTER"));
        assert_eq!(first.tx.name.as_deref(), Some("Aspirin"));
        assert_eq!(first.timestamp.timestamp_millis(), 1_735_689_600_000);

        let second = &response.logs[1];
        assert_eq!(second.tx.found, Some(true));
        assert_eq!(
            second.timestamp,
            Utc.with_ymd_and_hms(2025, 1, 1, 12, 30, 0).unwrap()
        );

        // Unknown tx types survive parsing; the domain filter drops them later.
        let third = &response.logs[2];
        assert_eq!(third.tx.kind.as_deref(), Some("MINT"));
        assert_eq!(third.tx.name, None);
        assert_eq!(third.tx.found, None);
    }

    #[test]
    fn entry_without_tx_parses_as_empty_record() {
        let raw = r#"{"id": 9, "timestamp": 1735689600000, "hash": "0x9"}"#;
        let entry: LogEntry = serde_json::from_str(raw).expect("entry should parse");
        assert_eq!(entry.tx, TxRecord::default());
    }

    #[test]
    fn rejects_unparseable_timestamp() {
        let raw = r#"{"id": 1, "timestamp": "yesterday", "hash": "0x1", "tx": {}}"#;
        assert!(serde_json::from_str::<LogEntry>(raw).is_err());
    }
}
