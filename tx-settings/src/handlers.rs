//! # Settings Handlers
//!
//! Entry points for UI events on the settings panel. Each handler takes the
//! shared state, holds the lock for a single transition and logs what was
//! committed. Any change to a committed value marks the state as having
//! unsaved changes.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::SettingsConfig;
use crate::core::error::Result;
use crate::model::deadline::DeadlineUpdate;
use crate::model::gas::{GasPriceTier, GasUpdate};
use crate::model::slippage::{CustomTolerance, Preset};
use crate::state::{SettingsState, TransactionSettings};

pub type SharedSettings = Arc<RwLock<SettingsState>>;

/// Load persisted settings, falling back to configured defaults
pub fn load_settings(config: SettingsConfig) -> SharedSettings {
    let path = config.settings_file.clone();
    let defaults = TransactionSettings::from_config(&config);

    let settings = match TransactionSettings::load_or(&path, defaults.clone()) {
        Ok(settings) => {
            tracing::info!("Loaded transaction settings from {:?}", path);
            settings
        }
        Err(e) => {
            tracing::warn!("Failed to load settings from {:?}: {}. Using defaults.", path, e);
            defaults
        }
    };

    Arc::new(RwLock::new(SettingsState::new(config, &settings)))
}

/// Run one transition and flag unsaved changes if committed values moved
fn commit<T>(state: &SharedSettings, transition: impl FnOnce(&mut SettingsState) -> T) -> T {
    let mut app_state = state.write();
    let before = app_state.snapshot();
    let out = transition(&mut *app_state);
    if app_state.snapshot() != before {
        app_state.unsaved_changes = true;
    }
    out
}

/// Handle click on a slippage preset button
pub fn handle_preset_click(state: &SharedSettings, preset: Preset) -> u32 {
    commit(state, |s| s.slippage.select_preset(preset))
}

/// Handle keystroke in the custom slippage box
pub fn handle_slippage_input(state: &SharedSettings, raw: &str) -> CustomTolerance {
    let outcome = commit(state, |s| s.slippage.set_custom_tolerance_percent(raw));
    if outcome.risky {
        tracing::warn!(bps = ?outcome.tolerance_bps, "High slippage tolerance set");
    }
    outcome
}

pub fn handle_slippage_blur(state: &SharedSettings) {
    state.write().slippage.blur();
}

/// Handle keystroke in the deadline box
pub fn handle_deadline_input(state: &SharedSettings, raw: &str) -> DeadlineUpdate {
    commit(state, |s| s.deadline.set_deadline_minutes(raw))
}

pub fn handle_deadline_blur(state: &SharedSettings) {
    state.write().deadline.blur();
}

/// Handle multihop toggle, returning the new value
pub fn handle_multihop_toggle(state: &SharedSettings) -> bool {
    commit(state, |s| {
        s.multihop = !s.multihop;
        tracing::debug!(multihop = s.multihop, "Multihop toggled");
        s.multihop
    })
}

pub fn handle_gas_tier_click(state: &SharedSettings, tier: GasPriceTier) -> bool {
    commit(state, |s| s.gas.select_tier(tier))
}

pub fn handle_gas_tier_double_click(state: &SharedSettings, tier: GasPriceTier) -> bool {
    commit(state, |s| s.gas.clear_tier(tier))
}

/// Handle keystroke in the custom gas price box (gwei)
pub fn handle_gas_input(state: &SharedSettings, raw: &str) -> GasUpdate {
    commit(state, |s| s.gas.set_custom_gwei(raw))
}

pub fn handle_gas_blur(state: &SharedSettings) {
    state.write().gas.blur();
}

/// Handle wallet switching networks
pub fn handle_network_change(state: &SharedSettings, mainnet: bool) {
    commit(state, |s| {
        s.config.mainnet = mainnet;
        s.gas.set_network(mainnet);
    });
    tracing::info!(mainnet, "Network changed");
}

/// Handle settings save
pub fn handle_settings_save(state: &SharedSettings) -> Result<()> {
    let (settings, path) = {
        let app_state = state.read();
        (app_state.snapshot(), app_state.config.settings_file.clone())
    };

    match settings.save_to_file(&path) {
        Ok(()) => {
            state.write().unsaved_changes = false;
            tracing::info!("Saved transaction settings to {:?}", path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to save settings: {}", e);
            Err(e)
        }
    }
}

/// Handle settings reset to configured defaults
pub fn handle_settings_reset(state: &SharedSettings) {
    commit(state, |s| {
        let defaults = TransactionSettings::from_config(&s.config);
        s.apply(&defaults);
    });
    tracing::info!("Settings reset to defaults");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::gas::PreferredGasPrice;
    use crate::model::slippage::PresetState;

    fn temp_config() -> SettingsConfig {
        SettingsConfig {
            settings_file: std::env::temp_dir()
                .join(format!("tx-settings-{}", uuid::Uuid::new_v4()))
                .join("settings.json"),
            ..SettingsConfig::default()
        }
    }

    #[test]
    fn test_load_without_file_uses_config_defaults() {
        let config = SettingsConfig {
            default_deadline_minutes: 15,
            ..temp_config()
        };
        let state = load_settings(config);

        let app_state = state.read();
        assert_eq!(app_state.deadline.deadline_seconds(), 900);
        assert_eq!(app_state.slippage.tolerance_bps(), 50);
        assert!(!app_state.unsaved_changes);
    }

    #[test]
    fn test_preset_click_marks_unsaved() {
        let state = load_settings(temp_config());

        // Same as the default: nothing committed changes
        handle_preset_click(&state, Preset::Medium);
        assert!(!state.read().unsaved_changes);

        assert_eq!(handle_preset_click(&state, Preset::High), 100);
        assert!(state.read().unsaved_changes);
    }

    #[test]
    fn test_rejected_keystroke_changes_nothing() {
        let state = load_settings(temp_config());

        let outcome = handle_slippage_input(&state, "abc");
        assert!(!outcome.accepted);
        assert!(!state.read().unsaved_changes);
        assert_eq!(state.read().slippage.custom_text(), "");
    }

    #[test]
    fn test_slippage_input_and_blur() {
        let state = load_settings(temp_config());

        let outcome = handle_slippage_input(&state, "6");
        assert_eq!(outcome.tolerance_bps, Some(600));
        assert!(outcome.risky);

        handle_slippage_input(&state, "");
        handle_slippage_blur(&state);

        let app_state = state.read();
        assert_eq!(app_state.slippage.preset_state(), PresetState::Custom);
        assert_eq!(app_state.slippage.custom_text(), "6");
    }

    #[test]
    fn test_deadline_and_multihop() {
        let state = load_settings(temp_config());

        assert_eq!(handle_deadline_input(&state, "15").deadline_seconds, Some(900));
        assert!(!handle_multihop_toggle(&state));
        assert!(handle_multihop_toggle(&state));

        handle_deadline_input(&state, "");
        handle_deadline_blur(&state);
        assert_eq!(state.read().deadline.input_text(), "15");
    }

    #[test]
    fn test_gas_tier_flow() {
        let state = load_settings(temp_config());

        assert!(handle_gas_tier_click(&state, GasPriceTier::Instant));
        assert!(handle_gas_tier_double_click(&state, GasPriceTier::Instant));
        assert_eq!(state.read().gas.preferred(), None);

        handle_gas_tier_click(&state, GasPriceTier::Normal);
        handle_network_change(&state, false);
        assert_eq!(state.read().gas.preferred(), None);
        assert!(!handle_gas_tier_click(&state, GasPriceTier::Fast));

        assert_eq!(handle_gas_input(&state, "2").wei, Some(2_000_000_000));
        handle_gas_blur(&state);
        assert_eq!(state.read().gas.input_text(), "2");
        assert_eq!(
            state.read().gas.preferred(),
            Some(PreferredGasPrice::Custom { wei: 2_000_000_000 })
        );
    }

    #[test]
    fn test_save_reload_and_reset() {
        let config = temp_config();
        let dir = config.settings_file.parent().unwrap().to_path_buf();
        let state = load_settings(config.clone());

        handle_slippage_input(&state, "0.75");
        handle_deadline_input(&state, "45");
        handle_settings_save(&state).unwrap();
        assert!(!state.read().unsaved_changes);

        let reloaded = load_settings(config);
        {
            let app_state = reloaded.read();
            assert_eq!(app_state.slippage.tolerance_bps(), 75);
            assert_eq!(app_state.slippage.custom_text(), "0.75");
            assert_eq!(app_state.deadline.deadline_minutes(), 45);
        }

        handle_settings_reset(&reloaded);
        {
            let app_state = reloaded.read();
            assert_eq!(app_state.snapshot(), TransactionSettings::default());
            assert!(app_state.unsaved_changes);
        }

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_load_corrupt_file_falls_back() {
        let config = temp_config();
        let dir = config.settings_file.parent().unwrap().to_path_buf();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&config.settings_file, "{ broken").unwrap();

        let state = load_settings(config);
        assert_eq!(state.read().snapshot(), TransactionSettings::default());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_load_zero_deadline_uses_config_default() {
        let config = SettingsConfig {
            default_deadline_minutes: 15,
            ..temp_config()
        };
        let dir = config.settings_file.parent().unwrap().to_path_buf();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&config.settings_file, r#"{"deadline_seconds":0}"#).unwrap();

        let state = load_settings(config);
        assert_eq!(state.read().deadline.deadline_seconds(), 900);
        assert!(!state.read().unsaved_changes);

        let _ = std::fs::remove_dir_all(dir);
    }
}
