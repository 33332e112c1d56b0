/// Default cadence for quote refresh polling, in seconds
pub const DEFAULT_QUOTE_REFRESH_SECS: u64 = 30;

/// Default cadence for portfolio-insights refresh polling, in seconds
pub const DEFAULT_INSIGHTS_REFRESH_SECS: u64 = 300;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
