//! Transaction history models
//!
//! History entries are read-only on the client: the backend owns the ledger
//! and returns entries in chronological ascending order. Display code
//! reverses that to show the newest entry first.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Kind of ledger entry as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    TransferIn,
    TransferOut,
}

impl TransactionKind {
    /// Whether this entry adds funds to the account.
    pub fn is_incoming(&self) -> bool {
        matches!(self, Self::Deposit | Self::TransferIn)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdraw => "WITHDRAW",
            Self::TransferIn => "TRANSFER_IN",
            Self::TransferOut => "TRANSFER_OUT",
        }
    }
}

/// A single entry from the backend's transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Sending user; set on transfer entries.
    #[serde(default)]
    pub from_user: Option<String>,
    /// Receiving user; set on transfer entries.
    #[serde(default)]
    pub to_user: Option<String>,
    /// Amount as number from the API (older clients posted strings, and
    /// the backend echoes them)
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    /// Timestamp string, displayed verbatim.
    pub time: String,
}

impl TransactionRecord {
    /// Amount with display sign: incoming positive, outgoing negative.
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.is_incoming() {
            self.amount
        } else {
            -self.amount
        }
    }
}

/// Deserialize amount that can be number or string
fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => {
            let s = n.to_string();
            s.parse::<Decimal>()
                .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e)))
        }
        JsonValue::String(s) => s
            .parse::<Decimal>()
            .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e))),
        _ => Err(D::Error::custom("expected number or string for amount")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_direction() {
        assert!(TransactionKind::Deposit.is_incoming());
        assert!(TransactionKind::TransferIn.is_incoming());
        assert!(!TransactionKind::Withdraw.is_incoming());
        assert!(!TransactionKind::TransferOut.is_incoming());
    }

    #[test]
    fn test_record_from_wire() {
        let record: TransactionRecord = serde_json::from_str(
            r#"{"type":"TRANSFER_OUT","fromUser":"alice","toUser":"bob","amount":25.5,"time":"2025-01-15 10:30:00"}"#,
        )
        .unwrap();
        assert_eq!(record.kind, TransactionKind::TransferOut);
        assert_eq!(record.from_user.as_deref(), Some("alice"));
        assert_eq!(record.to_user.as_deref(), Some("bob"));
        assert_eq!(record.amount, Decimal::new(2550, 2));
        assert_eq!(record.signed_amount(), Decimal::new(-2550, 2));
    }

    #[test]
    fn test_record_amount_as_string() {
        // Older form handlers posted amounts as strings; the backend echoes them back
        let record: TransactionRecord = serde_json::from_str(
            r#"{"type":"DEPOSIT","amount":"100","time":"2025-01-15 09:00:00"}"#,
        )
        .unwrap();
        assert_eq!(record.amount, Decimal::new(100, 0));
        assert_eq!(record.signed_amount(), Decimal::new(100, 0));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: std::result::Result<TransactionRecord, _> = serde_json::from_str(
            r#"{"type":"REFUND","amount":1,"time":"t"}"#,
        );
        assert!(result.is_err());
    }
}
