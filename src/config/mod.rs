pub mod settings;

pub use settings::{AppSettings, RetrievalSettings, Settings, SourceSettings};
