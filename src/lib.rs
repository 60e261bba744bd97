//! Source-routing and caching engine for multi-provider market data.
//!
//! The crate routes each data request (quotes, options chains, historical
//! bars, account data) to the best available upstream provider, caches
//! responses with per-kind TTLs, and reports request statistics and health.
//!
//! Core pieces:
//! - [`provider::DataProvider`]: the trait every upstream adapter implements
//! - [`provider::ProviderRegistry`]: configured instances, in routing order
//! - [`routing::select_provider`]: the single-shot selection policy
//! - [`cache::ResponseCache`]: TTL cache keyed by request shape
//! - [`manager::DataManager`]: the facade callers talk to
//!
//! ```no_run
//! use std::sync::Arc;
//! use market_router::config::{ProviderSettings, RouterConfig};
//! use market_router::manager::DataManager;
//! use market_router::provider::{DataProvider, ProviderCategory};
//!
//! # async fn run(polygon: Arc<dyn DataProvider>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = RouterConfig {
//!     providers: vec![ProviderSettings {
//!         name: "POLYGON".to_string(),
//!         category: ProviderCategory::MarketData,
//!         enabled: true,
//!         api_key: None,
//!         rate_limit_per_minute: None,
//!     }],
//!     default_market_data_provider: Some("POLYGON".to_string()),
//!     cache_enabled: true,
//! };
//! let manager = DataManager::new(&config, vec![polygon])?;
//! manager.initialize().await;
//! let quote = manager.get_quote("SPY", None, None).await;
//! println!("{:?}", quote.payload);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod constants;
pub mod errors;
pub mod manager;
pub mod models;
pub mod provider;
pub mod routing;
pub mod stats;

pub use config::{ProviderSettings, RouterConfig};
pub use errors::{ProviderError, RouterError};
pub use manager::DataManager;
pub use models::{DataKind, DataPayload, DataResponse};
pub use provider::{DataProvider, ProviderCategory, ProviderRegistry};
