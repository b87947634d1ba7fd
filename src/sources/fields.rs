//! Field shapes shared by the provider decoders.
//!
//! Every shape ends in an `Other` variant so an unexpected JSON type on one
//! field never rejects the whole record.

use chrono::DateTime;
use serde::de::IgnoredAny;
use serde::Deserialize;

/// Integer quantity sent either as a JSON number or a decimal string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(u64),
    Text(String),
    Other(IgnoredAny),
}

impl Quantity {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Quantity::Number(n) => Some(*n),
            Quantity::Text(s) => s.trim().parse().ok(),
            Quantity::Other(_) => None,
        }
    }

    /// Decimal digits only, so wei values larger than `u64` survive intact.
    pub fn as_decimal_string(&self) -> Option<String> {
        match self {
            Quantity::Number(n) => Some(n.to_string()),
            Quantity::Text(s) => {
                let s = s.trim();
                if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                    Some(s.to_string())
                } else {
                    None
                }
            }
            Quantity::Other(_) => None,
        }
    }
}

/// Block time as epoch seconds or RFC 3339 text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Seconds(u64),
    Text(String),
    Other(IgnoredAny),
}

impl Timestamp {
    /// `None` for zero, unparseable or pre-epoch values.
    pub fn as_epoch_seconds(&self) -> Option<u64> {
        let secs = match self {
            Timestamp::Seconds(n) => Some(*n),
            Timestamp::Text(s) => {
                let s = s.trim();
                match s.parse::<u64>() {
                    Ok(secs) => Some(secs),
                    Err(_) => DateTime::parse_from_rfc3339(s)
                        .ok()
                        .and_then(|dt| u64::try_from(dt.timestamp()).ok()),
                }
            }
            Timestamp::Other(_) => None,
        };
        secs.filter(|&s| s > 0)
    }
}

/// Address as a bare string or as an object carrying a `hash`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AddressRef {
    Object { hash: String },
    Plain(String),
    Other(IgnoredAny),
}

impl AddressRef {
    /// The address text, `None` when absent or empty.
    pub fn into_address(self) -> Option<String> {
        match self {
            AddressRef::Object { hash } => Some(hash),
            AddressRef::Plain(s) => Some(s),
            AddressRef::Other(_) => None,
        }
        .filter(|s| !s.is_empty())
    }
}

/// Outcome flag. Only a real JSON boolean counts as one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
    Other(IgnoredAny),
}

impl Flag {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Flag::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Flag::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Nested `block` object; only its timestamp is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BlockRef {
    Object { timestamp: Option<Timestamp> },
    Other(IgnoredAny),
}

impl BlockRef {
    pub fn timestamp(&self) -> Option<u64> {
        match self {
            BlockRef::Object { timestamp } => timestamp.as_ref().and_then(Timestamp::as_epoch_seconds),
            BlockRef::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quantity_shapes() {
        let n: Quantity = serde_json::from_value(json!(12)).unwrap();
        let s: Quantity = serde_json::from_value(json!("340282366920938463463374607431768211456")).unwrap();
        let bad: Quantity = serde_json::from_value(json!("0x10")).unwrap();

        assert_eq!(n.as_u64(), Some(12));
        assert_eq!(
            s.as_decimal_string().as_deref(),
            Some("340282366920938463463374607431768211456")
        );
        assert_eq!(s.as_u64(), None);
        assert_eq!(bad.as_decimal_string(), None);
    }

    #[test]
    fn test_timestamp_shapes() {
        let secs: Timestamp = serde_json::from_value(json!(1_700_000_000u64)).unwrap();
        let text: Timestamp = serde_json::from_value(json!("1700000000")).unwrap();
        let iso: Timestamp = serde_json::from_value(json!("2023-11-14T22:13:20.000000Z")).unwrap();
        let junk: Timestamp = serde_json::from_value(json!("yesterday")).unwrap();

        assert_eq!(secs.as_epoch_seconds(), Some(1_700_000_000));
        assert_eq!(text.as_epoch_seconds(), Some(1_700_000_000));
        assert_eq!(iso.as_epoch_seconds(), Some(1_700_000_000));
        assert_eq!(junk.as_epoch_seconds(), None);
    }

    #[test]
    fn test_address_ref_shapes() {
        let obj: AddressRef = serde_json::from_value(json!({ "hash": "0xAbC", "is_contract": false })).unwrap();
        let plain: AddressRef = serde_json::from_value(json!("0xdef")).unwrap();

        let empty: AddressRef = serde_json::from_value(json!("")).unwrap();
        let odd: AddressRef = serde_json::from_value(json!(42)).unwrap();

        assert_eq!(obj.into_address().as_deref(), Some("0xAbC"));
        assert_eq!(plain.into_address().as_deref(), Some("0xdef"));
        assert_eq!(empty.into_address(), None);
        assert_eq!(odd.into_address(), None);
    }

    #[test]
    fn test_unexpected_types_decode_to_other() {
        let float: Quantity = serde_json::from_value(json!(1.5e21)).unwrap();
        let negative: Quantity = serde_json::from_value(json!(-3)).unwrap();
        let nested: Timestamp = serde_json::from_value(json!({ "at": 1 })).unwrap();

        assert_eq!(float.as_decimal_string(), None);
        assert_eq!(float.as_u64(), None);
        assert_eq!(negative.as_u64(), None);
        assert_eq!(nested.as_epoch_seconds(), None);
    }

    #[test]
    fn test_flag_only_trusts_booleans() {
        let yes: Flag = serde_json::from_value(json!(true)).unwrap();
        let text: Flag = serde_json::from_value(json!("true")).unwrap();
        let number: Flag = serde_json::from_value(json!(1)).unwrap();

        assert_eq!(yes.as_bool(), Some(true));
        assert_eq!(text.as_bool(), None);
        assert_eq!(text.as_text(), Some("true"));
        assert_eq!(number.as_bool(), None);
    }

    #[test]
    fn test_block_ref_timestamp() {
        let obj: BlockRef = serde_json::from_value(json!({ "timestamp": "1700000000" })).unwrap();
        let number: BlockRef = serde_json::from_value(json!(12_345_678)).unwrap();

        assert_eq!(obj.timestamp(), Some(1_700_000_000));
        assert_eq!(number.timestamp(), None);
    }
}
