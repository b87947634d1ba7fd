use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Canonical transaction record shared by every source adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTransaction {
    pub hash: String,
    pub from: String,
    pub to: Option<String>,
    /// Decimal string in wei.
    pub value_wei: String,
    /// Seconds since epoch, UTC.
    #[serde(rename = "timeStamp")]
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
}

impl NormalizedTransaction {
    /// Builds a record, enforcing the required-field invariant.
    ///
    /// Returns `None` when `hash` or `from` is empty or `timestamp` is zero.
    /// Addresses are lower-cased and an empty `to` is treated as absent.
    pub fn new(
        hash: String,
        from: String,
        to: Option<String>,
        value_wei: String,
        timestamp: u64,
    ) -> Option<Self> {
        let hash = hash.trim().to_string();
        let from = from.trim().to_lowercase();
        if hash.is_empty() || from.is_empty() || timestamp == 0 {
            return None;
        }

        let to = to
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());

        Some(Self {
            hash,
            from,
            to,
            value_wei,
            timestamp,
            success: None,
            nonce: None,
        })
    }

    pub fn with_success(mut self, success: Option<bool>) -> Self {
        self.success = success;
        self
    }

    pub fn with_nonce(mut self, nonce: Option<u64>) -> Self {
        self.nonce = nonce;
        self
    }

    /// Both endpoints, `to` first, skipping a missing recipient.
    pub fn endpoints(&self) -> impl Iterator<Item = &str> + '_ {
        self.to.as_deref().into_iter().chain(std::iter::once(self.from.as_str()))
    }

    /// Value in ether, if it fits in a `Decimal`.
    pub fn value_ether(&self) -> Option<Decimal> {
        let wei = Decimal::from_str(&self.value_wei).ok()?;
        let ether = wei.checked_div(Decimal::from(1_000_000_000_000_000_000u64))?;
        Some(ether.normalize())
    }
}

/// One page of normalized transactions returned by a source adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPage {
    pub transactions: Vec<NormalizedTransaction>,
    /// Raw items the provider returned, including ones dropped by normalization.
    pub fetched: usize,
    /// Opaque token for the next page, owned by the adapter.
    pub next_cursor: Option<String>,
}

impl TransactionPage {
    pub fn is_exhausted(&self) -> bool {
        self.fetched == 0 || self.next_cursor.is_none()
    }
}
