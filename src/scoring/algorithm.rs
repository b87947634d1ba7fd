use std::collections::{BTreeSet, HashSet};

use crate::{
    models::{ActivitySummary, NormalizedTransaction, ScoreBreakdown, ScoreTier},
    registry::{self, ProtocolRegistry},
    scoring::ScoringWeights,
    utils::time::utc_date,
};

/// Heuristic v1 activity scoring over a normalized transaction list.
pub struct ScoringAlgorithm<'r> {
    weights: ScoringWeights,
    registry: &'r ProtocolRegistry,
}

impl Default for ScoringAlgorithm<'static> {
    fn default() -> Self {
        Self::new(ScoringWeights::default(), registry::registry())
    }
}

impl<'r> ScoringAlgorithm<'r> {
    pub fn new(weights: ScoringWeights, registry: &'r ProtocolRegistry) -> Self {
        Self { weights, registry }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn summarize(&self, transactions: &[NormalizedTransaction]) -> ActivitySummary {
        let tx_count = transactions.len();
        let active_days = Self::count_active_days(transactions);
        let protocols_used = self.detect_protocols(transactions);

        let breakdown = self.calculate_breakdown(tx_count, active_days, protocols_used.len());
        let score = Self::clamp_score(breakdown.total());

        ActivitySummary {
            tx_count,
            active_days,
            protocols_used,
            score,
            tier: ScoreTier::from_score(score),
        }
    }

    pub fn breakdown(&self, summary: &ActivitySummary) -> ScoreBreakdown {
        self.calculate_breakdown(
            summary.tx_count,
            summary.active_days,
            summary.protocols_used.len(),
        )
    }

    fn calculate_breakdown(
        &self,
        tx_count: usize,
        active_days: usize,
        protocol_count: usize,
    ) -> ScoreBreakdown {
        let w = &self.weights;
        ScoreBreakdown {
            tx_points: (tx_count as f64 * w.points_per_tx).min(w.max_tx_points),
            day_points: (active_days as f64 * w.points_per_active_day).min(w.max_day_points),
            protocol_points: (protocol_count as f64 * w.points_per_protocol)
                .min(w.max_protocol_points),
        }
    }

    /// Round, then clamp into 0..=100. Non-finite totals score zero.
    fn clamp_score(total: f64) -> u8 {
        let rounded = total.round();
        if !rounded.is_finite() {
            return 0;
        }
        rounded.clamp(0.0, 100.0) as u8
    }

    fn count_active_days(transactions: &[NormalizedTransaction]) -> usize {
        transactions
            .iter()
            .filter_map(|tx| utc_date(tx.timestamp))
            .collect::<HashSet<_>>()
            .len()
    }

    fn detect_protocols(&self, transactions: &[NormalizedTransaction]) -> Vec<String> {
        let names: BTreeSet<&str> = transactions
            .iter()
            .flat_map(|tx| tx.endpoints())
            .filter_map(|address| self.registry.resolve(address))
            .map(|entry| entry.name.as_str())
            .collect();

        names.into_iter().map(str::to_string).collect()
    }
}

/// Summarize activity with the v1 weights and the built-in registry.
pub fn summarize_activity(transactions: &[NormalizedTransaction]) -> ActivitySummary {
    ScoringAlgorithm::default().summarize(transactions)
}
