use crate::{models::NormalizedTransaction, sources::SourceSelection};

pub const DEFAULT_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Inclusive lower bound, epoch seconds.
    pub from_timestamp: Option<u64>,
    /// Inclusive upper bound, epoch seconds.
    pub to_timestamp: Option<u64>,
    /// Maximum transactions returned after filtering.
    pub limit: usize,
    pub source: SourceSelection,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            from_timestamp: None,
            to_timestamp: None,
            limit: DEFAULT_LIMIT,
            source: SourceSelection::Auto,
        }
    }
}

impl FetchOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_source(mut self, source: SourceSelection) -> Self {
        self.source = source;
        self
    }

    pub fn with_time_range(mut self, from: Option<u64>, to: Option<u64>) -> Self {
        self.from_timestamp = from;
        self.to_timestamp = to;
        self
    }

    pub fn contains(&self, timestamp: u64) -> bool {
        self.from_timestamp.map_or(true, |from| timestamp >= from)
            && self.to_timestamp.map_or(true, |to| timestamp <= to)
    }

    /// Time filter, newest-first stable sort, then truncate to `limit`.
    pub fn apply(&self, mut transactions: Vec<NormalizedTransaction>) -> Vec<NormalizedTransaction> {
        transactions.retain(|tx| self.contains(tx.timestamp));
        transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        transactions.truncate(self.limit);
        transactions
    }
}
