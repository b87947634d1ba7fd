use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    models::{NormalizedTransaction, Result, TransactionPage},
    sources::{
        client::{request_error, status_error, SourceConfig, SourceKind, TransactionSource},
        fields::{AddressRef, BlockRef, Flag, Quantity, Timestamp},
    },
};

/// Items requested per Blockscout page.
pub const PAGE_LIMIT: usize = 100;

/// Blockscout v2 REST client (cursor-paginated).
pub struct BlockscoutClient {
    http_client: reqwest::Client,
    config: SourceConfig,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BlockscoutResponse {
    Paged(BlockscoutPage),
    Bare(Vec<Value>),
}

#[derive(Deserialize)]
struct BlockscoutPage {
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    next_page_params: Option<NextPageParams>,
    #[serde(default)]
    next_page_cursor: Option<String>,
}

#[derive(Deserialize)]
struct NextPageParams {
    #[serde(default)]
    cursor: Option<String>,
}

/// One transaction as returned by `/api/v2/addresses/{address}/transactions`.
///
/// Older explorer builds use `sender`/`recipient`, `timeStamp` or a nested
/// `block.timestamp`; those are read as fallbacks.
#[derive(Debug, Deserialize)]
struct BlockscoutTx {
    hash: Option<String>,
    from: Option<AddressRef>,
    sender: Option<AddressRef>,
    to: Option<AddressRef>,
    recipient: Option<AddressRef>,
    value: Option<Quantity>,
    timestamp: Option<Timestamp>,
    #[serde(rename = "timeStamp")]
    time_stamp: Option<Timestamp>,
    block: Option<BlockRef>,
    success: Option<Flag>,
    status: Option<Flag>,
    nonce: Option<Quantity>,
}

impl BlockscoutTx {
    fn into_normalized(self) -> Option<NormalizedTransaction> {
        let success = self
            .success
            .as_ref()
            .and_then(Flag::as_bool)
            .or_else(|| match self.status.as_ref().and_then(Flag::as_text) {
                Some("ok") => Some(true),
                Some("error") => Some(false),
                _ => None,
            });

        let timestamp = self
            .timestamp
            .as_ref()
            .and_then(Timestamp::as_epoch_seconds)
            .or_else(|| self.time_stamp.as_ref().and_then(Timestamp::as_epoch_seconds))
            .or_else(|| self.block.as_ref().and_then(BlockRef::timestamp))?;

        let from = self
            .from
            .and_then(AddressRef::into_address)
            .or_else(|| self.sender.and_then(AddressRef::into_address))?;
        let to = self
            .to
            .and_then(AddressRef::into_address)
            .or_else(|| self.recipient.and_then(AddressRef::into_address));

        let tx = NormalizedTransaction::new(
            self.hash?,
            from,
            to,
            self.value
                .and_then(|v| v.as_decimal_string())
                .unwrap_or_else(|| "0".to_string()),
            timestamp,
        )?;

        Some(
            tx.with_success(success)
                .with_nonce(self.nonce.and_then(|n| n.as_u64())),
        )
    }
}

/// Decode one raw Blockscout item, `None` if it lacks a required field.
pub fn normalize_blockscout_tx(raw: Value) -> Option<NormalizedTransaction> {
    serde_json::from_value::<BlockscoutTx>(raw)
        .ok()
        .and_then(BlockscoutTx::into_normalized)
}

impl BlockscoutClient {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let http_client = config.http_client(SourceKind::Blockscout)?;
        Ok(Self { http_client, config })
    }

    async fn request_page(&self, address: &str, cursor: Option<&str>) -> Result<BlockscoutResponse> {
        let url = format!(
            "{}/addresses/{}/transactions",
            self.config.trimmed_base_url(),
            address
        );
        let limit = PAGE_LIMIT.to_string();

        let mut request = self
            .http_client
            .get(&url)
            .query(&[("filter", "all"), ("limit", limit.as_str())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| request_error(SourceKind::Blockscout, e))?;

        if !response.status().is_success() {
            return Err(status_error(SourceKind::Blockscout, response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| request_error(SourceKind::Blockscout, e))
    }
}

#[async_trait]
impl TransactionSource for BlockscoutClient {
    fn kind(&self) -> SourceKind {
        SourceKind::Blockscout
    }

    async fn fetch_page(
        &self,
        address: &str,
        cursor: Option<String>,
        _size_hint: usize,
    ) -> Result<TransactionPage> {
        let (items, next_cursor) = match self.request_page(address, cursor.as_deref()).await? {
            BlockscoutResponse::Paged(page) => {
                let next = page
                    .next_page_params
                    .and_then(|p| p.cursor)
                    .or(page.next_page_cursor)
                    .filter(|c| !c.is_empty());
                (page.items, next)
            }
            BlockscoutResponse::Bare(items) => (items, None),
        };

        let fetched = items.len();
        let transactions: Vec<_> = items.into_iter().filter_map(normalize_blockscout_tx).collect();

        debug!(
            "Blockscout page for {}: {} items, {} normalized, more={}",
            address,
            fetched,
            transactions.len(),
            next_cursor.is_some()
        );

        Ok(TransactionPage {
            transactions,
            fetched,
            next_cursor,
        })
    }
}
