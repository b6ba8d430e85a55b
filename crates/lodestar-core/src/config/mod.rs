mod cache_config;
mod chunking_config;
pub mod defaults;
mod observability_config;
mod query_config;
mod rerank_config;
mod retrieval_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use cache_config::CacheConfig;
pub use chunking_config::ChunkingConfig;
pub use observability_config::ObservabilityConfig;
pub use query_config::QueryConfig;
pub use rerank_config::RerankConfig;
pub use retrieval_config::RetrievalConfig;

use crate::constants::MAX_RETRY_ATTEMPTS;
use crate::errors::{ConfigError, LodestarResult};

/// Top-level configuration. Every section is optional in TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LodestarConfig {
    pub chunking: ChunkingConfig,
    pub query: QueryConfig,
    pub retrieval: RetrievalConfig,
    pub cache: CacheConfig,
    pub rerank: RerankConfig,
    pub observability: ObservabilityConfig,
}

impl LodestarConfig {
    /// Parse from a TOML string. Missing sections and fields take defaults.
    pub fn from_toml(toml_str: &str) -> LodestarResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> LodestarResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn validate(&self) -> LodestarResult<()> {
        self.chunking.validate()?;

        if self.retrieval.rrf_k == 0 {
            return Err(invalid("retrieval.rrf_k", "must be greater than zero"));
        }
        if self.retrieval.candidate_multiplier == 0 {
            return Err(invalid(
                "retrieval.candidate_multiplier",
                "must be greater than zero",
            ));
        }
        if self.retrieval.max_retries > MAX_RETRY_ATTEMPTS {
            return Err(invalid(
                "retrieval.max_retries",
                &format!("at most {MAX_RETRY_ATTEMPTS} retries are allowed"),
            ));
        }
        if self.rerank.max_retries > MAX_RETRY_ATTEMPTS {
            return Err(invalid(
                "rerank.max_retries",
                &format!("at most {MAX_RETRY_ATTEMPTS} retries are allowed"),
            ));
        }
        if !(0.0..=1.0).contains(&self.query.confidence_floor) {
            return Err(invalid("query.confidence_floor", "must lie in [0, 1]"));
        }
        if self.cache.max_entries == 0 {
            return Err(invalid("cache.max_entries", "must be greater than zero"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> crate::errors::LodestarError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
