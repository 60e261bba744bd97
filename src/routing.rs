//! Provider selection policy.
//!
//! Selection is single-shot: one provider is chosen per request and no
//! failover is attempted if it errors. Precedence, first match wins:
//!
//! 1. explicit source preference, any category;
//! 2. a connected broker serving the request's account (quotes and
//!    options only, never historical);
//! 3. the configured default market-data provider;
//! 4. the first connected market-data provider in registration order.

use std::sync::Arc;

use log::debug;

use crate::models::DataKind;
use crate::provider::{DataProvider, ProviderRegistry};

/// Inputs the routing policy considers for one request.
#[derive(Debug, Clone, Copy)]
pub struct RoutingContext<'a> {
    pub symbol: &'a str,
    pub kind: DataKind,
    pub source_preference: Option<&'a str>,
    pub account_id: Option<&'a str>,
}

/// Picks the provider for a request, or `None` when nothing qualifies.
pub fn select_provider(
    ctx: &RoutingContext<'_>,
    registry: &ProviderRegistry,
) -> Option<Arc<dyn DataProvider>> {
    if let Some(preferred) = ctx.source_preference {
        if let Some(provider) = registry.get(preferred) {
            if provider.is_connected() {
                debug!(
                    "Routing {:?} for {} to preferred source '{}'",
                    ctx.kind, ctx.symbol, preferred
                );
                return Some(Arc::clone(provider));
            }
        }
        debug!(
            "Preferred source '{}' unavailable for {}, falling through",
            preferred, ctx.symbol
        );
    }

    // Brokers return account-aware data for quotes and options chains, but
    // market-data vendors have the deeper history.
    if ctx.kind != DataKind::Historical {
        if let Some(account_id) = ctx.account_id {
            let broker = registry
                .broker_providers()
                .find(|p| p.is_connected() && p.serves_account(account_id));
            if let Some(broker) = broker {
                debug!(
                    "Routing {:?} for {} to broker '{}' serving account {}",
                    ctx.kind,
                    ctx.symbol,
                    broker.name(),
                    account_id
                );
                return Some(Arc::clone(broker));
            }
        }
    }

    if let Some(default) = registry.default_market_data_provider() {
        if default.is_connected() {
            return Some(Arc::clone(default));
        }
    }

    registry
        .market_data_providers()
        .find(|p| p.is_connected())
        .map(Arc::clone)
}
