//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

/// Number of calendar days covered by the rolling projection window,
/// today included.
pub const PROJECTION_WINDOW_DAYS: u64 = 7;

/// Default interval between board recomputations.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

/// Display color for technical rota entries.
pub const TECHNICAL_COLOR: &str = "#2563eb";

/// Display color for political rota entries.
pub const POLITICAL_COLOR: &str = "#dc2626";

/// Default database file name when no configuration is provided.
pub const DEFAULT_DB_PATH: &str = "rotaboard.db";

/// Default connection pool size.
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;
