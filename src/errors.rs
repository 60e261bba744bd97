//! Error types for the market router.
//!
//! `ProviderError` is the failure value returned by every provider data
//! operation: network failures, vendor rejections, and missing data are all
//! expected outcomes, never panics crossing the provider boundary. The
//! coordinator folds these into `DataResponse.error` strings; its public
//! operations never return `Err`.

use thiserror::Error;

/// Errors surfaced by provider implementations.
///
/// Each variant maps to a distinguishable human-readable string so the
/// coordinator and routing policy can, in principle, react differently,
/// e.g. temporarily deprioritize a rate-limited provider. The current
/// policy does not.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Authentication with the upstream source failed.
    #[error("Authentication failed: {provider} - {message}")]
    Authentication { provider: String, message: String },

    /// The upstream source rate limited the request.
    #[error("Rate limited: {provider}")]
    RateLimited { provider: String },

    /// The symbol exists but the provider has no data for it.
    #[error("Data not available: {symbol} - {message}")]
    DataNotAvailable { symbol: String, message: String },

    /// The provider does not implement this operation
    /// (e.g. account data on a market-data vendor).
    #[error("Operation '{operation}' not supported by provider '{provider}'")]
    NotSupported { operation: String, provider: String },

    /// The provider is not connected.
    #[error("Provider not connected: {provider}")]
    NotConnected { provider: String },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },
}

impl ProviderError {
    pub fn not_supported(operation: &str, provider: &str) -> Self {
        Self::NotSupported {
            operation: operation.to_string(),
            provider: provider.to_string(),
        }
    }

    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    pub fn data_not_available(symbol: &str, message: impl Into<String>) -> Self {
        Self::DataNotAvailable {
            symbol: symbol.to_string(),
            message: message.into(),
        }
    }
}

/// Errors raised while building the provider registry. Runtime routing
/// dead ends are reported through `DataResponse`, not through this type.
#[derive(Error, Debug)]
pub enum RouterError {
    /// Two providers were registered under the same name.
    #[error("Duplicate provider: {0}")]
    DuplicateProvider(String),

    /// A provider instance reports a different category than it was
    /// configured with. Checked once at registration, not per call.
    #[error("Category mismatch for provider '{provider}': configured as {configured}, reports {reported}")]
    CategoryMismatch {
        provider: String,
        configured: String,
        reported: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ProviderError::RateLimited {
            provider: "POLYGON".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: POLYGON");

        let error = ProviderError::not_supported("account info", "ALPHA_VANTAGE");
        assert_eq!(
            format!("{}", error),
            "Operation 'account info' not supported by provider 'ALPHA_VANTAGE'"
        );

        let error = ProviderError::provider("SCHWAB", "internal server error");
        assert_eq!(
            format!("{}", error),
            "Provider error: SCHWAB - internal server error"
        );
    }

    #[test]
    fn test_router_error_display() {
        let error = RouterError::DuplicateProvider("POLYGON".to_string());
        assert_eq!(format!("{}", error), "Duplicate provider: POLYGON");

        let error = RouterError::CategoryMismatch {
            provider: "SCHWAB".to_string(),
            configured: "market-data".to_string(),
            reported: "broker".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Category mismatch for provider 'SCHWAB': configured as market-data, reports broker"
        );
    }
}
