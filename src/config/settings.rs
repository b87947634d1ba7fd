use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    scoring::ScoringWeights,
    sources::{SourceConfig, SourceSelection},
};

/// Environment variable consulted when no BaseScan key is configured.
pub const BASESCAN_API_KEY_ENV: &str = "BASESCAN_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub sources: SourceSettings,
    pub retrieval: RetrievalSettings,
    pub scoring: ScoringSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    pub blockscout_url: String,
    pub basescan_url: String,
    pub basescan_api_key: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalSettings {
    pub default_limit: usize,
    pub max_pages: usize,
    pub default_source: SourceSelection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub weights: ScoringWeights,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Base Activity Score".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
            },
            sources: SourceSettings {
                blockscout_url: "https://base.blockscout.com/api/v2".to_string(),
                basescan_url: "https://api.basescan.org/api".to_string(),
                basescan_api_key: None,
                timeout_seconds: 30,
            },
            retrieval: RetrievalSettings {
                default_limit: 200,
                max_pages: 50,
                default_source: SourceSelection::Auto,
            },
            scoring: ScoringSettings {
                weights: ScoringWeights::default(),
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("ACTIVITY_SCORE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize::<Settings>().map(Settings::with_env_api_key)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize::<Settings>().map(Settings::with_env_api_key)
    }

    fn with_env_api_key(mut self) -> Self {
        if self.sources.basescan_api_key.as_deref().map_or(true, str::is_empty) {
            self.sources.basescan_api_key = std::env::var(BASESCAN_API_KEY_ENV)
                .ok()
                .filter(|k| !k.is_empty());
        }
        self
    }

    pub fn blockscout_config(&self) -> SourceConfig {
        SourceConfig {
            base_url: self.sources.blockscout_url.clone(),
            api_key: None,
            timeout_seconds: self.sources.timeout_seconds,
        }
    }

    pub fn basescan_config(&self) -> SourceConfig {
        SourceConfig {
            base_url: self.sources.basescan_url.clone(),
            api_key: self.sources.basescan_api_key.clone(),
            timeout_seconds: self.sources.timeout_seconds,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.scoring.weights.validate()?;

        if self.sources.timeout_seconds == 0 {
            return Err("Source timeout must be greater than zero".to_string());
        }

        if self.retrieval.max_pages == 0 {
            return Err("max_pages must be greater than zero".to_string());
        }

        for (name, url) in [
            ("blockscout_url", &self.sources.blockscout_url),
            ("basescan_url", &self.sources.basescan_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.retrieval.default_limit, 200);
        assert_eq!(settings.retrieval.default_source, SourceSelection::Auto);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.sources.timeout_seconds = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.sources.basescan_url = "api.basescan.org".to_string();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.retrieval.max_pages = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_source_configs_carry_timeout_and_key() {
        let mut settings = Settings::default();
        settings.sources.basescan_api_key = Some("key".to_string());
        settings.sources.timeout_seconds = 7;

        let basescan = settings.basescan_config();
        assert_eq!(basescan.api_key.as_deref(), Some("key"));
        assert_eq!(basescan.timeout_seconds, 7);
        assert!(settings.blockscout_config().api_key.is_none());
    }
}
