//! Dashboard configuration.
//!
//! Settings live in `dashboard_config.yaml` at the root of the data directory:
//!
//! ```yaml
//! tax_rate: 0.18
//! rate_multiplier: 300.0
//! currency_symbol: "Rs"
//! events_per_cell_preview: 2
//! upcoming_events_limit: 4
//! log_level: "info"
//! data_format_version: "1.0"
//! ```
//!
//! Missing keys fall back to their defaults, so older files keep loading.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "TUITION_DASHBOARD_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Tax applied to the invoice subtotal
    pub tax_rate: f64,
    /// Applied to quantity x rate for each invoice line (tuition rate to rupees)
    pub rate_multiplier: f64,
    pub currency_symbol: String,
    /// How many event titles a grid cell shows before "+N more"
    pub events_per_cell_preview: usize,
    pub upcoming_events_limit: usize,
    /// Default log filter when `RUST_LOG` is not set
    pub log_level: String,
    pub data_format_version: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tax_rate: 0.18,
            rate_multiplier: 300.0,
            currency_symbol: "Rs".to_string(),
            events_per_cell_preview: 2,
            upcoming_events_limit: 4,
            log_level: "info".to_string(),
            data_format_version: "1.0".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Replace out-of-range values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(0.0..=1.0).contains(&self.tax_rate) {
            warn!("Ignoring tax_rate {} outside 0..=1, using {}", self.tax_rate, defaults.tax_rate);
            self.tax_rate = defaults.tax_rate;
        }
        if !self.rate_multiplier.is_finite() || self.rate_multiplier <= 0.0 {
            warn!(
                "Ignoring non-positive rate_multiplier {}, using {}",
                self.rate_multiplier, defaults.rate_multiplier
            );
            self.rate_multiplier = defaults.rate_multiplier;
        }
        self
    }
}

/// Resolve the data directory: explicit path, then the environment, then
/// `~/Documents/Tuition Dashboard`.
pub fn resolve_data_directory(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }

    if let Ok(path) = env::var(DATA_DIR_ENV) {
        if !path.trim().is_empty() {
            info!("Using data directory from {}: {}", DATA_DIR_ENV, path);
            return PathBuf::from(path);
        }
    }

    let base = dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("Tuition Dashboard")
}
