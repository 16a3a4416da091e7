//! Settings configuration from environment variables

use std::path::PathBuf;

use lib_utils::envs::{lookup_env, parse_flag, parse_list, parse_value};

use crate::core::error::{AppError, Result};
use crate::model::deadline::DEFAULT_DEADLINE_MINUTES;
use crate::model::slippage::{Preset, RiskThresholds, SlippagePresets};

/// Runtime configuration.
///
/// Preset values, thresholds and the default deadline differ between swap
/// and liquidity flows, so they are configuration rather than constants.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsConfig {
    /// Persisted settings file (`TX_SETTINGS_FILE`)
    pub settings_file: PathBuf,
    /// Log directory (`TX_LOG_DIR`)
    pub log_dir: PathBuf,
    /// Log level filter (`RUST_LOG`, e.g. "tx_settings=debug,info")
    pub log_level: String,
    /// Write logs to a rolling file instead of stderr (`TX_FILE_LOG`)
    pub file_log: bool,
    /// Preset tolerances in bps, `low,medium,high` (`TX_SLIPPAGE_PRESETS`)
    pub presets: SlippagePresets,
    /// Preset applied when nothing is persisted (`TX_SUGGESTED_PRESET`)
    pub suggested_preset: Preset,
    /// Warning thresholds (`TX_RISKY_LOW_BPS`, `TX_RISKY_HIGH_BPS`)
    pub thresholds: RiskThresholds,
    /// Custom tolerances at or above this are not committed (`TX_MAX_CUSTOM_BPS`)
    pub max_custom_bps: Option<u32>,
    /// Deadline when nothing is persisted (`TX_DEFAULT_DEADLINE_MINUTES`)
    pub default_deadline_minutes: u64,
    /// Connected to mainnet, enabling gas price tiers (`TX_MAINNET`)
    pub mainnet: bool,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            settings_file: PathBuf::from("./tx-settings.json"),
            log_dir: PathBuf::from("logs"),
            log_level: "tx_settings=info,warn".to_string(),
            file_log: false,
            presets: SlippagePresets::default(),
            suggested_preset: Preset::Medium,
            thresholds: RiskThresholds::default(),
            max_custom_bps: None,
            default_deadline_minutes: DEFAULT_DEADLINE_MINUTES,
            mainnet: true,
        }
    }
}

impl SettingsConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(lookup_env)
    }

    /// Load configuration from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("TX_SETTINGS_FILE") {
            config.settings_file = PathBuf::from(path);
        }
        if let Some(dir) = lookup("TX_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("RUST_LOG") {
            config.log_level = level;
        }
        if let Some(flag) = lookup("TX_FILE_LOG") {
            config.file_log = parse_flag(&flag);
        }
        if let Some(raw) = lookup("TX_SLIPPAGE_PRESETS") {
            config.presets = parse_presets(&raw)?;
        }
        if let Some(raw) = lookup("TX_SUGGESTED_PRESET") {
            config.suggested_preset = Preset::try_from(parse_value::<u8>("TX_SUGGESTED_PRESET", &raw)?)
                .map_err(|e| AppError::Config(e.to_string()))?;
        }
        if let Some(raw) = lookup("TX_RISKY_LOW_BPS") {
            config.thresholds.low_bps = parse_value("TX_RISKY_LOW_BPS", &raw)?;
        }
        if let Some(raw) = lookup("TX_RISKY_HIGH_BPS") {
            config.thresholds.high_bps = parse_value("TX_RISKY_HIGH_BPS", &raw)?;
        }
        if let Some(raw) = lookup("TX_MAX_CUSTOM_BPS") {
            config.max_custom_bps = Some(parse_value("TX_MAX_CUSTOM_BPS", &raw)?);
        }
        if let Some(raw) = lookup("TX_DEFAULT_DEADLINE_MINUTES") {
            config.default_deadline_minutes = parse_value("TX_DEFAULT_DEADLINE_MINUTES", &raw)?;
        }
        if let Some(flag) = lookup("TX_MAINNET") {
            config.mainnet = parse_flag(&flag);
        }

        if config.default_deadline_minutes == 0 {
            return Err(AppError::Config(
                "TX_DEFAULT_DEADLINE_MINUTES must be greater than 0".to_string(),
            ));
        }
        let SlippagePresets { low, medium, high } = config.presets;
        if low == medium || medium == high || low == high {
            return Err(AppError::Config(format!(
                "TX_SLIPPAGE_PRESETS values must differ, got {low},{medium},{high}"
            )));
        }
        if config.thresholds.low_bps > config.thresholds.high_bps {
            return Err(AppError::Config(format!(
                "TX_RISKY_LOW_BPS ({}) is above TX_RISKY_HIGH_BPS ({})",
                config.thresholds.low_bps, config.thresholds.high_bps
            )));
        }

        Ok(config)
    }

    /// Tolerance used when nothing is persisted.
    pub fn suggested_bps(&self) -> u32 {
        self.presets.bps(self.suggested_preset)
    }
}

fn parse_presets(raw: &str) -> Result<SlippagePresets> {
    match parse_list::<u32>("TX_SLIPPAGE_PRESETS", raw)?.as_slice() {
        [low, medium, high] => Ok(SlippagePresets::new(*low, *medium, *high)),
        other => Err(AppError::Config(format!(
            "TX_SLIPPAGE_PRESETS needs 3 values, got {}",
            other.len()
        ))),
    }
}
