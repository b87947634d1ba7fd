use tracing::info;

use crate::{
    config::Settings,
    models::{ActivitySummary, NormalizedTransaction, Result, ScoreBreakdown},
    registry,
    retrieval::{FetchOptions, TransactionFetcher},
    scoring::ScoringAlgorithm,
};

/// Everything produced for one address in one call.
#[derive(Debug, Clone)]
pub struct ActivityReport {
    pub address: String,
    pub transactions: Vec<NormalizedTransaction>,
    pub summary: ActivitySummary,
    pub breakdown: ScoreBreakdown,
}

/// Fetches an address's history and scores it.
pub struct ScoreCalculator {
    fetcher: TransactionFetcher,
    algorithm: ScoringAlgorithm<'static>,
}

impl ScoreCalculator {
    pub fn new(fetcher: TransactionFetcher, settings: &Settings) -> Self {
        let algorithm = ScoringAlgorithm::new(settings.scoring.weights.clone(), registry::registry());

        Self { fetcher, algorithm }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(TransactionFetcher::from_settings(settings)?, settings))
    }

    pub fn fetcher(&self) -> &TransactionFetcher {
        &self.fetcher
    }

    pub async fn calculate(&self, address: &str, options: &FetchOptions) -> Result<ActivityReport> {
        info!("Calculating activity score for {}", address);

        let transactions = self.fetcher.get_transactions(address, options).await?;
        let summary = self.algorithm.summarize(&transactions);
        let breakdown = self.algorithm.breakdown(&summary);

        info!(
            "Scored {}: {} txs, {} active days, {} protocols -> {} ({})",
            address,
            summary.tx_count,
            summary.active_days,
            summary.protocols_used.len(),
            summary.score,
            summary.tier
        );

        Ok(ActivityReport {
            address: address.to_lowercase(),
            transactions,
            summary,
            breakdown,
        })
    }
}
