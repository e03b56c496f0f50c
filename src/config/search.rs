//! Travel search service configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Travel search service configuration (flight/hotel lookups)
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the search service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-lookup timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SearchConfig {
    /// Validate search configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidSearchUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    10
}
