pub mod fetcher;
pub mod options;

pub use fetcher::TransactionFetcher;
pub use options::{FetchOptions, DEFAULT_LIMIT};
