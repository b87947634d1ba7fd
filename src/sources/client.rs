use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::models::{ActivityScoreError, Result, TransactionPage};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Which explorer this source talks to
    fn kind(&self) -> SourceKind;

    /// Fetch one page of normalized transactions for `address`.
    ///
    /// `cursor` is whatever the previous page returned in `next_cursor`.
    /// `size_hint` is how many transactions the caller is after in total;
    /// offset-based sources use it to size their single request.
    async fn fetch_page(
        &self,
        address: &str,
        cursor: Option<String>,
        size_hint: usize,
    ) -> Result<TransactionPage>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Blockscout,
    Basescan,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Blockscout => "blockscout",
            SourceKind::Basescan => "basescan",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SourceKind::Blockscout => "Blockscout",
            SourceKind::Basescan => "BaseScan",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Which source(s) a retrieval call may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSelection {
    #[default]
    Auto,
    Blockscout,
    Basescan,
}

impl SourceSelection {
    /// The single source named, or `None` for automatic fallback.
    pub fn kind(&self) -> Option<SourceKind> {
        match self {
            SourceSelection::Auto => None,
            SourceSelection::Blockscout => Some(SourceKind::Blockscout),
            SourceSelection::Basescan => Some(SourceKind::Basescan),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceSelection::Auto => "auto",
            SourceSelection::Blockscout => "blockscout",
            SourceSelection::Basescan => "basescan",
        }
    }
}

impl FromStr for SourceSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(SourceSelection::Auto),
            "blockscout" => Ok(SourceSelection::Blockscout),
            "basescan" | "etherscan" => Ok(SourceSelection::Basescan),
            other => Err(format!(
                "unknown source '{}', expected auto, blockscout or basescan",
                other
            )),
        }
    }
}

impl fmt::Display for SourceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for explorer clients
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl SourceConfig {
    pub(crate) fn http_client(&self, kind: SourceKind) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_seconds))
            .build()
            .map_err(|e| {
                ActivityScoreError::ConfigError(format!(
                    "Failed to create {} HTTP client: {}",
                    kind, e
                ))
            })
    }

    pub(crate) fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

pub(crate) fn request_error(kind: SourceKind, err: reqwest::Error) -> ActivityScoreError {
    ActivityScoreError::SourceRequest {
        provider: kind.display_name().to_string(),
        message: err.to_string(),
    }
}

pub(crate) fn status_error(kind: SourceKind, status: reqwest::StatusCode) -> ActivityScoreError {
    ActivityScoreError::SourceStatus {
        provider: kind.display_name().to_string(),
        status: status.as_u16(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_selection_parsing() {
        assert_eq!("auto".parse::<SourceSelection>(), Ok(SourceSelection::Auto));
        assert_eq!("Blockscout".parse::<SourceSelection>(), Ok(SourceSelection::Blockscout));
        assert_eq!("basescan".parse::<SourceSelection>(), Ok(SourceSelection::Basescan));
        assert!("moralis".parse::<SourceSelection>().is_err());
    }

    #[test]
    fn test_selection_kind() {
        assert_eq!(SourceSelection::Auto.kind(), None);
        assert_eq!(SourceSelection::Basescan.kind(), Some(SourceKind::Basescan));
        assert_eq!(SourceSelection::default(), SourceSelection::Auto);
    }
}
