use crate::prelude::*;
use agentmint_core::catalog::CatalogKind;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Marketplace backend connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Build the configuration from the global CLI flags (which already fold in the environment)
    pub fn from_global(global: &crate::Global) -> Result<Self> {
        let base_url = global.api_url.trim().trim_end_matches('/').to_string();

        if base_url.is_empty() {
            return Err(eyre!("AGENTMINT_API_URL must not be empty"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(eyre!(
                "AGENTMINT_API_URL must start with http:// or https://, got '{}'",
                base_url
            ));
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(global.timeout.max(1)),
        })
    }

    /// Full URL of the listing endpoint for `kind`
    pub fn endpoint(&self, kind: CatalogKind) -> String {
        f!("{}/{}", self.base_url, kind.endpoint())
    }
}

pub fn create_client(config: &ApiConfig) -> Result<reqwest::Client> {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .user_agent(concat!("agentmint/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}
