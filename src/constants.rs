use std::time::Duration;

/// Cache lifetimes, fixed per data kind.
pub const QUOTE_TTL: Duration = Duration::from_secs(30);
pub const OPTIONS_CHAIN_TTL: Duration = Duration::from_secs(300);
pub const HISTORICAL_TTL: Duration = Duration::from_secs(3600);

/// Default values
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 60;
pub const DEFAULT_BAR_INTERVAL: &str = "1d";
