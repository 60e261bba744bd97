//! Provider abstraction: the [`DataProvider`] trait and the registry that
//! holds configured instances.

mod registry;
mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use registry::{ProviderCounts, ProviderRegistry};
pub use traits::{DataProvider, ProviderCapabilities, ProviderCategory, ProviderInfo};
