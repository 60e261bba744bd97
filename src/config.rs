//! Router configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RATE_LIMIT_PER_MINUTE;
use crate::provider::ProviderCategory;

fn default_enabled() -> bool {
    true
}

fn default_cache_enabled() -> bool {
    true
}

/// Per-provider settings, typically loaded from an application config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    /// Unique provider name, matched against the instance's reported name.
    pub name: String,
    pub category: ProviderCategory,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_minute: Option<u32>,
}

impl ProviderSettings {
    /// Effective rate limit for the vendor adapter to enforce.
    pub fn rate_limit(&self) -> u32 {
        self.rate_limit_per_minute
            .unwrap_or(DEFAULT_RATE_LIMIT_PER_MINUTE)
    }
}

/// Top-level routing configuration. Order of `providers` determines
/// routing tie-breaks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterConfig {
    pub providers: Vec<ProviderSettings>,
    /// Preferred market-data provider when no explicit source is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_market_data_provider: Option<String>,
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            default_market_data_provider: None,
            cache_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "providers": [
                {"name": "SCHWAB", "category": "broker"},
                {"name": "POLYGON", "category": "market-data", "enabled": false,
                 "rateLimitPerMinute": 120}
            ],
            "defaultMarketDataProvider": "POLYGON"
        }"#;
        let config: RouterConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.providers.len(), 2);
        assert!(config.providers[0].enabled);
        assert_eq!(config.providers[0].category, ProviderCategory::Broker);
        assert!(!config.providers[1].enabled);
        assert_eq!(config.providers[1].rate_limit_per_minute, Some(120));
        assert_eq!(config.providers[1].rate_limit(), 120);
        assert_eq!(config.providers[0].rate_limit(), 60);
        assert_eq!(
            config.default_market_data_provider.as_deref(),
            Some("POLYGON")
        );
        assert!(config.cache_enabled);
    }
}
