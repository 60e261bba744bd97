//! Provider registry construction and lookup.
//!
//! The registry is built once at startup from [`RouterConfig`] plus the
//! externally constructed provider instances. Registration order follows
//! the order of the configured settings and is preserved for routing
//! tie-breaks.

use std::collections::HashMap;
use std::sync::Arc;

use log::{info, warn};

use crate::config::RouterConfig;
use crate::errors::RouterError;
use crate::provider::traits::{DataProvider, ProviderCategory, ProviderInfo};

/// Connectivity counts across the registered providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderCounts {
    pub total: usize,
    pub connected: usize,
    pub brokers: usize,
    pub connected_brokers: usize,
    pub market_data: usize,
    pub connected_market_data: usize,
}

/// Immutable set of registered providers, keyed by name.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn DataProvider>>,
    ordered_ids: Vec<String>,
    default_market_data: Option<String>,
}

impl ProviderRegistry {
    /// Builds the registry from configuration and provider instances.
    ///
    /// Disabled settings are skipped. A setting with no matching instance,
    /// or an instance with no matching setting, is skipped with a warning.
    /// Duplicate names and category mismatches fail construction.
    pub fn from_config(
        config: &RouterConfig,
        providers: Vec<Arc<dyn DataProvider>>,
    ) -> Result<Self, RouterError> {
        let mut by_name: HashMap<String, Arc<dyn DataProvider>> = HashMap::new();
        for provider in providers {
            let name = provider.name().to_string();
            if by_name.insert(name.clone(), provider).is_some() {
                return Err(RouterError::DuplicateProvider(name));
            }
        }

        let mut registered: HashMap<String, Arc<dyn DataProvider>> = HashMap::new();
        let mut ordered_ids = Vec::new();

        for settings in &config.providers {
            if !settings.enabled {
                info!("Provider '{}' is disabled, skipping", settings.name);
                continue;
            }
            if registered.contains_key(&settings.name) {
                return Err(RouterError::DuplicateProvider(settings.name.clone()));
            }
            let Some(provider) = by_name.remove(&settings.name) else {
                warn!(
                    "No provider instance supplied for configured provider '{}', skipping",
                    settings.name
                );
                continue;
            };
            if provider.category() != settings.category {
                return Err(RouterError::CategoryMismatch {
                    provider: settings.name.clone(),
                    configured: settings.category.to_string(),
                    reported: provider.category().to_string(),
                });
            }
            info!(
                "Registered provider '{}' ({})",
                settings.name,
                settings.category
            );
            ordered_ids.push(settings.name.clone());
            registered.insert(settings.name.clone(), provider);
        }

        for name in by_name.keys() {
            warn!("Provider instance '{}' has no configured settings, ignoring", name);
        }

        let default_market_data = match &config.default_market_data_provider {
            Some(name) => match registered.get(name) {
                Some(provider) if provider.category() == ProviderCategory::MarketData => {
                    Some(name.clone())
                }
                Some(_) => {
                    warn!(
                        "Default market data provider '{}' is not a market-data provider, ignoring",
                        name
                    );
                    None
                }
                None => {
                    warn!("Default market data provider '{}' is not registered, ignoring", name);
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            providers: registered,
            ordered_ids,
            default_market_data,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn DataProvider>> {
        self.providers.get(name)
    }

    /// Looks up a broker by name. Returns `None` for market-data providers.
    pub fn get_broker(&self, name: &str) -> Option<&Arc<dyn DataProvider>> {
        self.providers
            .get(name)
            .filter(|p| p.category() == ProviderCategory::Broker)
    }

    /// Providers in registration order.
    pub fn ordered(&self) -> impl Iterator<Item = &Arc<dyn DataProvider>> + '_ {
        self.ordered_ids.iter().filter_map(|id| self.providers.get(id))
    }

    pub fn market_data_providers(&self) -> impl Iterator<Item = &Arc<dyn DataProvider>> + '_ {
        self.ordered()
            .filter(|p| p.category() == ProviderCategory::MarketData)
    }

    pub fn broker_providers(&self) -> impl Iterator<Item = &Arc<dyn DataProvider>> + '_ {
        self.ordered()
            .filter(|p| p.category() == ProviderCategory::Broker)
    }

    pub fn default_market_data_provider(&self) -> Option<&Arc<dyn DataProvider>> {
        self.default_market_data
            .as_deref()
            .and_then(|name| self.providers.get(name))
    }

    pub fn len(&self) -> usize {
        self.ordered_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_ids.is_empty()
    }

    pub fn counts(&self) -> ProviderCounts {
        let mut counts = ProviderCounts {
            total: 0,
            connected: 0,
            brokers: 0,
            connected_brokers: 0,
            market_data: 0,
            connected_market_data: 0,
        };
        for provider in self.ordered() {
            counts.total += 1;
            let connected = provider.is_connected();
            if connected {
                counts.connected += 1;
            }
            match provider.category() {
                ProviderCategory::Broker => {
                    counts.brokers += 1;
                    if connected {
                        counts.connected_brokers += 1;
                    }
                }
                ProviderCategory::MarketData => {
                    counts.market_data += 1;
                    if connected {
                        counts.connected_market_data += 1;
                    }
                }
            }
        }
        counts
    }

    pub fn infos(&self) -> Vec<ProviderInfo> {
        self.ordered().map(|p| p.info()).collect()
    }
}
