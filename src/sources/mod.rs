pub mod basescan;
pub mod blockscout;
pub mod client;
pub mod fields;

pub use basescan::BasescanClient;
pub use blockscout::BlockscoutClient;
pub use client::{SourceConfig, SourceKind, SourceSelection, TransactionSource};
