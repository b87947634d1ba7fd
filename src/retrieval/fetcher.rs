use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    config::Settings,
    models::{ActivityScoreError, NormalizedTransaction, Result},
    retrieval::FetchOptions,
    sources::{BasescanClient, BlockscoutClient, SourceKind, TransactionSource},
    utils::normalize_address,
};

/// Accumulation target never drops below one full page.
pub const MIN_FETCH_TARGET: usize = 100;

/// Retrieves, deduplicates, filters and orders transactions from an ordered
/// list of sources.
pub struct TransactionFetcher {
    sources: Vec<Arc<dyn TransactionSource>>,
    max_pages: usize,
}

impl TransactionFetcher {
    /// `sources` is the fallback order used in `auto` mode.
    pub fn new(sources: Vec<Arc<dyn TransactionSource>>) -> Self {
        Self {
            sources,
            max_pages: Settings::default().retrieval.max_pages,
        }
    }

    /// Blockscout first, then BaseScan.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let blockscout = BlockscoutClient::new(settings.blockscout_config())?;
        let basescan = BasescanClient::new(settings.basescan_config())?;

        Ok(Self::new(vec![Arc::new(blockscout), Arc::new(basescan)])
            .with_max_pages(settings.retrieval.max_pages))
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn sources(&self) -> impl Iterator<Item = SourceKind> + '_ {
        self.sources.iter().map(|s| s.kind())
    }

    /// Transactions for `address`, most recent first, at most `options.limit`.
    pub async fn get_transactions(
        &self,
        address: &str,
        options: &FetchOptions,
    ) -> Result<Vec<NormalizedTransaction>> {
        let address = normalize_address(address)?;
        let target = options.limit.max(MIN_FETCH_TARGET);

        let collected = match options.source.kind() {
            Some(kind) => {
                let source = self.source(kind)?;
                self.collect_from(source.as_ref(), &address, target).await?
            }
            None => self.collect_with_fallback(&address, target).await?,
        };

        Ok(options.apply(collected))
    }

    fn source(&self, kind: SourceKind) -> Result<&Arc<dyn TransactionSource>> {
        self.sources
            .iter()
            .find(|s| s.kind() == kind)
            .ok_or_else(|| ActivityScoreError::SourceNotConfigured(kind.as_str().to_string()))
    }

    /// Try each source in order; the first non-empty result wins.
    ///
    /// If nothing produced data and the last attempt failed, that failure is
    /// returned. Earlier failures are only logged.
    async fn collect_with_fallback(
        &self,
        address: &str,
        target: usize,
    ) -> Result<Vec<NormalizedTransaction>> {
        let mut last_error = None;

        for source in &self.sources {
            let kind = source.kind();
            match self.collect_from(source.as_ref(), address, target).await {
                Ok(transactions) if !transactions.is_empty() => {
                    info!("Fetched {} transactions for {} from {}", transactions.len(), address, kind);
                    return Ok(transactions);
                }
                Ok(_) => {
                    info!("{} returned no transactions for {}, trying next source", kind, address);
                    last_error = None;
                }
                Err(e) => {
                    warn!("{} failed for {}: {}", kind, address, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(Vec::new()),
        }
    }

    /// Page through one source until `target` unique transactions are
    /// collected or the source runs dry.
    async fn collect_from(
        &self,
        source: &dyn TransactionSource,
        address: &str,
        target: usize,
    ) -> Result<Vec<NormalizedTransaction>> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor: Option<String> = None;

        for page_number in 1..=self.max_pages {
            let page = source.fetch_page(address, cursor.clone(), target).await?;
            if page.fetched == 0 {
                break;
            }

            for tx in page.transactions {
                if !seen.insert(tx.hash.clone()) {
                    continue;
                }
                out.push(tx);
                if out.len() >= target {
                    break;
                }
            }

            if out.len() >= target {
                break;
            }

            match page.next_cursor {
                Some(next) if cursor.as_ref() != Some(&next) => cursor = Some(next),
                Some(_) => {
                    warn!("{} repeated its pagination cursor for {}, stopping", source.kind(), address);
                    break;
                }
                None => break,
            }

            if page_number == self.max_pages {
                warn!(
                    "Stopped paging {} for {} after {} pages",
                    source.kind(),
                    address,
                    self.max_pages
                );
            }
        }

        debug!("Collected {} unique transactions from {}", out.len(), source.kind());
        Ok(out)
    }
}

impl std::fmt::Debug for TransactionFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionFetcher")
            .field("sources", &self.sources().collect::<Vec<_>>())
            .field("max_pages", &self.max_pages)
            .finish()
    }
}
