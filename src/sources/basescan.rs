use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    models::{NormalizedTransaction, Result, TransactionPage},
    sources::{
        client::{request_error, status_error, SourceConfig, SourceKind, TransactionSource},
        fields::{AddressRef, Quantity, Timestamp},
    },
};

/// Smallest `offset` ever requested from BaseScan.
pub const MIN_OFFSET: usize = 100;

/// BaseScan (Etherscan-compatible) `txlist` client. Returns everything in one page.
pub struct BasescanClient {
    http_client: reqwest::Client,
    config: SourceConfig,
}

#[derive(Deserialize)]
struct BasescanResponse {
    status: Option<String>,
    message: Option<String>,
    #[serde(default)]
    result: Value,
}

impl BasescanResponse {
    /// Etherscan-style APIs answer `status: "0"` for "no transactions" (and
    /// some soft errors). That is an empty result, not a failure.
    fn is_soft_empty(&self) -> bool {
        self.status.as_deref() == Some("0")
            && self.message.as_deref().map_or(false, |m| !m.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct BasescanTx {
    hash: Option<String>,
    from: Option<AddressRef>,
    to: Option<AddressRef>,
    value: Option<Quantity>,
    #[serde(rename = "timeStamp")]
    time_stamp: Option<Timestamp>,
    timestamp: Option<Timestamp>,
    #[serde(rename = "isError")]
    is_error: Option<Quantity>,
    nonce: Option<Quantity>,
}

impl BasescanTx {
    fn into_normalized(self) -> Option<NormalizedTransaction> {
        let success = self.is_error.and_then(|e| e.as_u64()).map(|code| code == 0);
        let timestamp = self
            .time_stamp
            .as_ref()
            .and_then(Timestamp::as_epoch_seconds)
            .or_else(|| self.timestamp.as_ref().and_then(Timestamp::as_epoch_seconds))?;

        let tx = NormalizedTransaction::new(
            self.hash?,
            self.from.and_then(AddressRef::into_address)?,
            self.to.and_then(AddressRef::into_address),
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

/// Decode one raw `txlist` entry, `None` if it lacks a required field.
pub fn normalize_basescan_tx(raw: Value) -> Option<NormalizedTransaction> {
    serde_json::from_value::<BasescanTx>(raw)
        .ok()
        .and_then(BasescanTx::into_normalized)
}

impl BasescanClient {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let http_client = config.http_client(SourceKind::Basescan)?;
        Ok(Self { http_client, config })
    }

    async fn request_txlist(&self, address: &str, offset: usize) -> Result<BasescanResponse> {
        let offset = offset.to_string();
        let mut request = self.http_client.get(self.config.trimmed_base_url()).query(&[
            ("module", "account"),
            ("action", "txlist"),
            ("address", address),
            ("sort", "desc"),
            ("page", "1"),
            ("offset", offset.as_str()),
        ]);
        if let Some(api_key) = self.config.api_key.as_deref() {
            request = request.query(&[("apikey", api_key)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| request_error(SourceKind::Basescan, e))?;

        if !response.status().is_success() {
            return Err(status_error(SourceKind::Basescan, response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| request_error(SourceKind::Basescan, e))
    }
}

#[async_trait]
impl TransactionSource for BasescanClient {
    fn kind(&self) -> SourceKind {
        SourceKind::Basescan
    }

    async fn fetch_page(
        &self,
        address: &str,
        _cursor: Option<String>,
        size_hint: usize,
    ) -> Result<TransactionPage> {
        let response = self.request_txlist(address, size_hint.max(MIN_OFFSET)).await?;

        if response.is_soft_empty() {
            info!(
                "BaseScan returned no data for {}: {}",
                address,
                response.message.as_deref().unwrap_or_default()
            );
            return Ok(TransactionPage::default());
        }

        let items = match response.result {
            Value::Array(items) => items,
            _ => Vec::new(),
        };
        let fetched = items.len();
        let transactions: Vec<_> = items.into_iter().filter_map(normalize_basescan_tx).collect();

        debug!(
            "BaseScan txlist for {}: {} items, {} normalized",
            address,
            fetched,
            transactions.len()
        );

        Ok(TransactionPage {
            transactions,
            fetched,
            next_cursor: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityScoreError;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ADDRESS: &str = "0x742d35cc6634c0532925a3b844bc9e7595f6e842";

    fn client_for(server: &MockServer, api_key: Option<&str>) -> BasescanClient {
        BasescanClient::new(SourceConfig {
            base_url: format!("{}/api", server.uri()),
            api_key: api_key.map(str::to_string),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_normalize_txlist_entry() {
        let raw = json!({
            "blockNumber": "1",
            "timeStamp": "1700000000",
            "hash": "0xabc",
            "nonce": "12",
            "from": "0xAAAA000000000000000000000000000000000001",
            "to": "",
            "value": "250000000000000000000000000000",
            "isError": "1",
            "txreceipt_status": "0"
        });

        let tx = normalize_basescan_tx(raw).unwrap();
        assert_eq!(tx.from, "0xaaaa000000000000000000000000000000000001");
        assert_eq!(tx.to, None);
        assert_eq!(tx.value_wei, "250000000000000000000000000000");
        assert_eq!(tx.timestamp, 1_700_000_000);
        assert_eq!(tx.success, Some(false));
        assert_eq!(tx.nonce, Some(12));
    }

    #[test]
    fn test_normalize_success_flag() {
        let ok = normalize_basescan_tx(json!({
            "hash": "0x1", "from": "0xa", "timeStamp": "5", "isError": "0"
        }))
        .unwrap();
        let unknown = normalize_basescan_tx(json!({
            "hash": "0x1", "from": "0xa", "timeStamp": "5"
        }))
        .unwrap();

        assert_eq!(ok.success, Some(true));
        assert_eq!(unknown.success, None);
    }

    #[test]
    fn test_unexpected_optional_types_keep_the_record() {
        let tx = normalize_basescan_tx(json!({
            "hash": "0x1",
            "from": "0xa",
            "to": 7,
            "value": 2.5e20,
            "timestamp": "1700000000",
            "isError": false,
            "nonce": [1]
        }))
        .unwrap();

        assert_eq!(tx.to, None);
        assert_eq!(tx.value_wei, "0");
        assert_eq!(tx.timestamp, 1_700_000_000);
        assert_eq!(tx.success, None);
        assert_eq!(tx.nonce, None);
    }

    #[test]
    fn test_normalize_drops_missing_timestamp() {
        assert!(normalize_basescan_tx(json!({ "hash": "0x1", "from": "0xa" })).is_none());
        assert!(normalize_basescan_tx(json!({ "hash": "0x1", "from": "0xa", "timeStamp": "0" })).is_none());
    }

    #[tokio::test]
    async fn test_fetch_page_builds_txlist_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api"))
            .and(query_param("module", "account"))
            .and(query_param("action", "txlist"))
            .and(query_param("address", ADDRESS))
            .and(query_param("sort", "desc"))
            .and(query_param("page", "1"))
            .and(query_param("offset", "300"))
            .and(query_param("apikey", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "1",
                "message": "OK",
                "result": [
                    { "hash": "0x1", "from": ADDRESS, "to": "0xb", "value": "1", "timeStamp": "1700000000", "isError": "0", "nonce": "0" },
                    { "hash": "0x2", "from": ADDRESS, "value": "1" }
                ]
            })))
            .mount(&server)
            .await;

        let page = client_for(&server, Some("secret"))
            .fetch_page(ADDRESS, None, 300)
            .await
            .unwrap();

        assert_eq!(page.fetched, 2);
        assert_eq!(page.transactions.len(), 1);
        assert!(page.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_offset_has_a_floor() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("offset", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "1", "message": "OK", "result": []
            })))
            .mount(&server)
            .await;

        let page = client_for(&server, None).fetch_page(ADDRESS, None, 10).await.unwrap();
        assert!(page.transactions.is_empty());
    }

    #[tokio::test]
    async fn test_status_zero_is_empty_not_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "0",
                "message": "No transactions found",
                "result": []
            })))
            .mount(&server)
            .await;

        let page = client_for(&server, None).fetch_page(ADDRESS, None, 200).await.unwrap();
        assert_eq!(page, TransactionPage::default());
    }

    #[tokio::test]
    async fn test_http_failure_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = client_for(&server, None).fetch_page(ADDRESS, None, 200).await.unwrap_err();
        assert!(matches!(err, ActivityScoreError::SourceStatus { status: 502, .. }));
    }
}
