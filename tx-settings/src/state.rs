//! # Settings State
//!
//! The whole transaction settings panel as one explicit value.
//!
//! [`TransactionSettings`] is the committed, persisted part: what the trade
//! construction code downstream consumes. [`SettingsState`] adds the live
//! editing state (input box text, network, unsaved flag) through the
//! controllers in [`crate::model`].
//!
//! ## Persistence
//!
//! Settings are stored as pretty-printed JSON. A missing file is not an
//! error; it means defaults.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tx_settings::state::TransactionSettings;
//!
//! let settings = TransactionSettings::load_from_file(Path::new("./tx-settings.json"))?;
//! println!("slippage: {} bps", settings.slippage_bps);
//! # Ok::<(), tx_settings::AppError>(())
//! ```

use std::path::Path;

use lib_utils::time::SECONDS_PER_MINUTE;
use serde::{Deserialize, Serialize};

use crate::config::SettingsConfig;
use crate::core::error::Result;
use crate::model::deadline::DeadlineController;
use crate::model::gas::{GasPriceController, PreferredGasPrice};
use crate::model::slippage::SlippageToleranceController;

/// Committed settings, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionSettings {
    /// Slippage tolerance in basis points
    pub slippage_bps: u32,
    /// Seconds from submission until the transaction expires
    pub deadline_seconds: u64,
    /// Allow multi-hop routes
    pub multihop: bool,
    /// Preferred gas price, `None` for the wallet default
    pub preferred_gas_price: Option<PreferredGasPrice>,
}

impl Default for TransactionSettings {
    fn default() -> Self {
        Self::from_config(&SettingsConfig::default())
    }
}

impl TransactionSettings {
    /// Defaults for a given configuration.
    pub fn from_config(config: &SettingsConfig) -> Self {
        Self {
            slippage_bps: config.suggested_bps(),
            deadline_seconds: config
                .default_deadline_minutes
                .saturating_mul(SECONDS_PER_MINUTE),
            multihop: true,
            preferred_gas_price: None,
        }
    }

    /// Load settings from a JSON file; a missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::load_or(path, Self::default())
    }

    /// Load settings from a JSON file; a missing file yields `fallback`.
    pub fn load_or(path: &Path, fallback: Self) -> Result<Self> {
        if !path.exists() {
            return Ok(fallback);
        }

        let content = std::fs::read_to_string(path)?;
        let settings: TransactionSettings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Replace values the controllers would never commit with the configured
    /// defaults: a zero deadline, or a non-preset slippage at or above the cap.
    pub fn checked(mut self, config: &SettingsConfig) -> Self {
        let defaults = Self::from_config(config);

        if self.deadline_seconds == 0 {
            tracing::warn!(
                default = defaults.deadline_seconds,
                "Persisted deadline of 0 seconds replaced with default"
            );
            self.deadline_seconds = defaults.deadline_seconds;
        }

        let over_cap = config
            .max_custom_bps
            .is_some_and(|cap| self.slippage_bps >= cap);
        if over_cap && config.presets.find(self.slippage_bps).is_none() {
            tracing::warn!(
                bps = self.slippage_bps,
                default = defaults.slippage_bps,
                "Persisted slippage above the custom cap replaced with default"
            );
            self.slippage_bps = defaults.slippage_bps;
        }

        self
    }

    /// Save settings to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Live settings panel state.
#[derive(Debug, Clone)]
pub struct SettingsState {
    pub config: SettingsConfig,
    pub slippage: SlippageToleranceController,
    pub deadline: DeadlineController,
    pub gas: GasPriceController,
    pub multihop: bool,
    /// Committed changes not yet saved to disk
    pub unsaved_changes: bool,
}

impl SettingsState {
    pub fn new(config: SettingsConfig, settings: &TransactionSettings) -> Self {
        let settings = settings.clone().checked(&config);
        let slippage = SlippageToleranceController::new(
            config.presets,
            config.thresholds,
            settings.slippage_bps,
        )
        .with_max_custom_bps(config.max_custom_bps);

        let mut deadline = DeadlineController::new(config.default_deadline_minutes);
        deadline.set_deadline_seconds(settings.deadline_seconds);

        let gas = GasPriceController::new(config.mainnet, settings.preferred_gas_price);

        Self {
            config,
            slippage,
            deadline,
            gas,
            multihop: settings.multihop,
            unsaved_changes: false,
        }
    }

    /// Replace committed values, e.g. after loading or resetting.
    pub fn apply(&mut self, settings: &TransactionSettings) {
        let settings = settings.clone().checked(&self.config);
        self.slippage.set_tolerance_bps(settings.slippage_bps);
        self.deadline.set_deadline_seconds(settings.deadline_seconds);
        self.gas.set_preferred(settings.preferred_gas_price);
        self.multihop = settings.multihop;
    }

    /// Committed values for persistence or trade construction.
    pub fn snapshot(&self) -> TransactionSettings {
        TransactionSettings {
            slippage_bps: self.slippage.tolerance_bps(),
            deadline_seconds: self.deadline.deadline_seconds(),
            multihop: self.multihop,
            preferred_gas_price: self.gas.preferred(),
        }
    }
}

impl Default for SettingsState {
    fn default() -> Self {
        let config = SettingsConfig::default();
        let settings = TransactionSettings::from_config(&config);
        Self::new(config, &settings)
    }
}
