pub mod config;
pub mod models;
pub mod registry;
pub mod retrieval;
pub mod scoring;
pub mod sources;
pub mod utils;

pub use config::Settings;
pub use models::{
    ActivityScoreError, ActivitySummary, NormalizedTransaction, ProtocolEntry, Result, ScoreTier,
};
pub use registry::{resolve_protocol_by_address, ProtocolRegistry};
pub use retrieval::{FetchOptions, TransactionFetcher};
pub use scoring::{summarize_activity, ScoreCalculator};
pub use sources::SourceSelection;
