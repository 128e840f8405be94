//! Named thresholds and the configuration seam.
//!
//! The expiring-soon window, the warning tier, the focus-list cap and the
//! option report window are product decisions. They live here with their
//! defaults so the external configuration layer can override them.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Days before expiry at which an option counts as "expiring soon".
pub const DEFAULT_EXPIRING_SOON_DAYS: u32 = 2;

/// Upper bound (inclusive, in days) of the "expiring-warning" color tier.
pub const DEFAULT_WARNING_DAYS: u32 = 7;

/// Maximum number of pending requests surfaced as focus items.
pub const DEFAULT_FOCUS_PENDING_LIMIT: usize = 5;

/// Look-ahead window of the option report.
pub const DEFAULT_REPORT_WINDOW_DAYS: u32 = 3;

/// Option duration used when neither configuration nor catalog supply one.
pub const FALLBACK_OPTION_TERM_DAYS: u32 = 7;

/// Thresholds shared by the lifecycle, catalog and query engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    /// Window for [`crate::domain::option_lifecycle::is_expiring_soon`].
    pub expiring_soon_days: u32,
    /// Upper bound of the orange expiry tier.
    pub warning_days: u32,
    /// Cap on pending-request focus items.
    pub focus_pending_limit: usize,
    /// Look-ahead used by the option report.
    pub report_window_days: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            expiring_soon_days: DEFAULT_EXPIRING_SOON_DAYS,
            warning_days: DEFAULT_WARNING_DAYS,
            focus_pending_limit: DEFAULT_FOCUS_PENDING_LIMIT,
            report_window_days: DEFAULT_REPORT_WINDOW_DAYS,
        }
    }
}

/// Read-only view of externally managed booking rules.
pub trait ConfigProvider: fmt::Debug + Send + Sync {
    /// Overridden default option term in days, if the operator set one.
    fn default_option_term_days(&self) -> Option<u32>;

    /// Effective thresholds.
    fn thresholds(&self) -> Thresholds {
        Thresholds::default()
    }
}

/// [`ConfigProvider`] with fixed values.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticConfig {
    /// Default option term override.
    pub default_option_term_days: Option<u32>,
    /// Thresholds to report.
    pub thresholds: Thresholds,
}

impl ConfigProvider for StaticConfig {
    fn default_option_term_days(&self) -> Option<u32> {
        self.default_option_term_days
    }

    fn thresholds(&self) -> Thresholds {
        self.thresholds
    }
}
