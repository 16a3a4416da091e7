//! # Slippage Tolerance
//!
//! Selected slippage tolerance in basis points, with three fixed presets and a
//! free-text custom field.
//!
//! The active preset is never stored. It is always derived from the committed
//! tolerance by [`reconcile`], so a value typed by hand that happens to equal
//! a preset lights that preset up, and an externally set value that matches
//! no preset shows up in the custom box.
//!
//! ```rust
//! use tx_settings::model::slippage::{
//!     Preset, PresetState, RiskThresholds, SlippagePresets, SlippageToleranceController,
//! };
//!
//! let presets = SlippagePresets::new(10, 100, 200);
//! let mut slippage =
//!     SlippageToleranceController::new(presets, RiskThresholds::default(), presets.bps(Preset::High));
//!
//! let custom = slippage.set_custom_tolerance_percent("6");
//! assert_eq!(custom.tolerance_bps, Some(600));
//! assert!(custom.risky);
//! assert_eq!(slippage.preset_state(), PresetState::Custom);
//!
//! slippage.set_custom_tolerance_percent("1");
//! assert_eq!(slippage.preset_state(), PresetState::Preset(Preset::Medium));
//! ```

use lib_utils::{InputGrammar, NumericInput};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::core::error::{AppError, Result};
use crate::model::decimal_from_text;

/// One of the three fixed tolerance buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Low, Preset::Medium, Preset::High];

    /// Position of the button, 1..=3.
    pub fn index(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Preset {
    type Error = AppError;

    fn try_from(index: u8) -> Result<Self> {
        match index {
            1 => Ok(Preset::Low),
            2 => Ok(Preset::Medium),
            3 => Ok(Preset::High),
            other => Err(AppError::Validation(format!(
                "preset index {other} is not 1, 2 or 3"
            ))),
        }
    }
}

/// Which slot of the selector is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetState {
    Preset(Preset),
    Custom,
}

impl PresetState {
    pub const CUSTOM_INDEX: u8 = 4;

    /// Slot index: 1..=3 for presets, 4 for custom.
    pub fn index(&self) -> u8 {
        match self {
            PresetState::Preset(preset) => preset.index(),
            PresetState::Custom => Self::CUSTOM_INDEX,
        }
    }
}

/// Tolerance in basis points behind each preset button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlippagePresets {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl SlippagePresets {
    pub fn new(low: u32, medium: u32, high: u32) -> Self {
        Self { low, medium, high }
    }

    pub fn bps(&self, preset: Preset) -> u32 {
        match preset {
            Preset::Low => self.low,
            Preset::Medium => self.medium,
            Preset::High => self.high,
        }
    }

    /// First preset whose value is exactly `bps`.
    pub fn find(&self, bps: u32) -> Option<Preset> {
        Preset::ALL.into_iter().find(|preset| self.bps(*preset) == bps)
    }
}

impl Default for SlippagePresets {
    /// 0.1%, 0.5% and 1%.
    fn default() -> Self {
        Self::new(10, 50, 100)
    }
}

/// Bounds outside which a tolerance gets a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskThresholds {
    /// Below this the transaction is likely to revert.
    pub low_bps: u32,
    /// Above this the transaction is exposed to front-running.
    pub high_bps: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_bps: 50,
            high_bps: 500,
        }
    }
}

/// Advisory shown under the selector. Never blocks submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlippageWarning {
    InvalidInput,
    RiskyLow,
    RiskyHigh,
}

impl SlippageWarning {
    pub fn message(&self) -> &'static str {
        match self {
            SlippageWarning::InvalidInput => "Enter a valid slippage percentage",
            SlippageWarning::RiskyLow => "Your transaction may fail",
            SlippageWarning::RiskyHigh => "Your transaction may be frontrun",
        }
    }
}

/// Outcome of a keystroke in the custom tolerance box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomTolerance {
    /// Text matched the grammar and is now shown in the box.
    pub accepted: bool,
    /// Newly committed tolerance, `None` when nothing was committed.
    pub tolerance_bps: Option<u32>,
    /// Committed tolerance is above the front-running threshold.
    pub risky: bool,
}

/// Derive the highlighted slot from a tolerance value.
pub fn reconcile(bps: u32, presets: &SlippagePresets) -> PresetState {
    presets
        .find(bps)
        .map_or(PresetState::Custom, PresetState::Preset)
}

/// Percent text for a tolerance, without trailing zeros (`150` → `"1.5"`).
pub fn bps_to_percent_string(bps: u32) -> String {
    Decimal::new(i64::from(bps), 2).normalize().to_string()
}

/// Basis points for accepted percent text (`"0.5"` → `50`).
pub fn percent_text_to_bps(text: &str) -> Option<u32> {
    decimal_from_text(text)?
        .checked_mul(Decimal::ONE_HUNDRED)?
        .trunc()
        .to_u32()
}

#[derive(Debug, Clone)]
pub struct SlippageToleranceController {
    presets: SlippagePresets,
    thresholds: RiskThresholds,
    max_custom_bps: Option<u32>,
    tolerance_bps: u32,
    custom_text: String,
    input: NumericInput,
}

impl SlippageToleranceController {
    pub fn new(presets: SlippagePresets, thresholds: RiskThresholds, initial_bps: u32) -> Self {
        let mut controller = Self {
            presets,
            thresholds,
            max_custom_bps: None,
            tolerance_bps: initial_bps,
            custom_text: String::new(),
            input: NumericInput::new(InputGrammar::Decimal),
        };
        controller.sync_custom_text();
        controller
    }

    /// Custom values at or above `cap` are shown but not committed.
    pub fn with_max_custom_bps(mut self, cap: Option<u32>) -> Self {
        self.max_custom_bps = cap;
        self
    }

    pub fn presets(&self) -> &SlippagePresets {
        &self.presets
    }

    pub fn tolerance_bps(&self) -> u32 {
        self.tolerance_bps
    }

    pub fn tolerance_percent(&self) -> String {
        bps_to_percent_string(self.tolerance_bps)
    }

    pub fn custom_text(&self) -> &str {
        &self.custom_text
    }

    pub fn preset_state(&self) -> PresetState {
        reconcile(self.tolerance_bps, &self.presets)
    }

    pub fn active_index(&self) -> u8 {
        self.preset_state().index()
    }

    pub fn is_risky(&self) -> bool {
        self.tolerance_bps > self.thresholds.high_bps
    }

    /// Click on a preset button.
    pub fn select_preset(&mut self, preset: Preset) -> u32 {
        self.tolerance_bps = self.presets.bps(preset);
        self.custom_text.clear();
        tracing::debug!(preset = preset.index(), bps = self.tolerance_bps, "Slippage preset selected");
        self.tolerance_bps
    }

    /// [`Self::select_preset`] by button index.
    pub fn select_preset_index(&mut self, index: u8) -> Result<u32> {
        let preset = Preset::try_from(index)?;
        Ok(self.select_preset(preset))
    }

    /// Keystroke in the custom box. `raw` is the whole field value.
    pub fn set_custom_tolerance_percent(&mut self, raw: &str) -> CustomTolerance {
        let Some(text) = self.input.sanitize(raw) else {
            return CustomTolerance {
                accepted: false,
                tolerance_bps: None,
                risky: false,
            };
        };

        let committed = percent_text_to_bps(&text)
            .filter(|bps| self.max_custom_bps.map_or(true, |cap| *bps < cap));
        self.custom_text = text;

        if let Some(bps) = committed {
            self.tolerance_bps = bps;
            tracing::debug!(
                bps,
                state = self.active_index(),
                risky = self.is_risky(),
                "Custom slippage committed"
            );
        }

        CustomTolerance {
            accepted: true,
            tolerance_bps: committed,
            risky: committed.is_some_and(|bps| bps > self.thresholds.high_bps),
        }
    }

    /// Tolerance changed from outside the selector (mount, reset, load).
    pub fn set_tolerance_bps(&mut self, bps: u32) {
        self.tolerance_bps = bps;
        self.sync_custom_text();
    }

    /// Custom box lost focus: show what is actually committed.
    pub fn blur(&mut self) {
        self.sync_custom_text();
    }

    pub fn warning(&self) -> Option<SlippageWarning> {
        let text_matches = self.custom_text.is_empty()
            || percent_text_to_bps(&self.custom_text) == Some(self.tolerance_bps);

        if !text_matches {
            Some(SlippageWarning::InvalidInput)
        } else if self.tolerance_bps < self.thresholds.low_bps {
            Some(SlippageWarning::RiskyLow)
        } else if self.tolerance_bps > self.thresholds.high_bps {
            Some(SlippageWarning::RiskyHigh)
        } else {
            None
        }
    }

    fn sync_custom_text(&mut self) {
        self.custom_text = match self.preset_state() {
            PresetState::Custom => bps_to_percent_string(self.tolerance_bps),
            PresetState::Preset(_) => String::new(),
        };
    }
}

impl Default for SlippageToleranceController {
    fn default() -> Self {
        let presets = SlippagePresets::default();
        Self::new(presets, RiskThresholds::default(), presets.bps(Preset::Medium))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> SlippageToleranceController {
        let presets = SlippagePresets::new(10, 100, 200);
        SlippageToleranceController::new(presets, RiskThresholds::default(), presets.bps(Preset::High))
    }

    #[test]
    fn test_select_preset() {
        let mut slippage = controller();

        assert_eq!(slippage.select_preset(Preset::Low), 10);
        assert_eq!(slippage.tolerance_bps(), 10);
        assert_eq!(slippage.active_index(), 1);

        assert_eq!(slippage.select_preset(Preset::High), 200);
        assert_eq!(slippage.active_index(), 3);
    }

    #[test]
    fn test_select_preset_is_idempotent() {
        let mut once = controller();
        once.select_preset(Preset::Medium);

        let mut twice = controller();
        twice.select_preset(Preset::Medium);
        twice.select_preset(Preset::Medium);

        assert_eq!(once.tolerance_bps(), twice.tolerance_bps());
        assert_eq!(once.preset_state(), twice.preset_state());
        assert_eq!(once.custom_text(), twice.custom_text());
    }

    #[test]
    fn test_select_preset_index() {
        let mut slippage = controller();
        assert_eq!(slippage.select_preset_index(2).unwrap(), 100);
        assert!(matches!(slippage.select_preset_index(4), Err(AppError::Validation(_))));
        assert!(matches!(slippage.select_preset_index(0), Err(AppError::Validation(_))));
        assert_eq!(slippage.tolerance_bps(), 100);
    }

    #[test]
    fn test_select_preset_clears_custom_text() {
        let mut slippage = controller();
        slippage.set_custom_tolerance_percent("3.5");
        slippage.select_preset(Preset::Low);
        assert_eq!(slippage.custom_text(), "");
    }

    #[test]
    fn test_custom_risky() {
        let mut slippage = controller();

        let high = slippage.set_custom_tolerance_percent("6");
        assert!(high.accepted);
        assert_eq!(high.tolerance_bps, Some(600));
        assert!(high.risky);
        assert_eq!(slippage.preset_state(), PresetState::Custom);
        assert_eq!(slippage.active_index(), PresetState::CUSTOM_INDEX);

        let low = slippage.set_custom_tolerance_percent("2");
        assert_eq!(low.tolerance_bps, Some(200));
        assert!(!low.risky);
    }

    #[test]
    fn test_exactly_five_percent_is_not_risky() {
        let mut slippage = controller();
        assert!(!slippage.set_custom_tolerance_percent("5").risky);
        assert!(slippage.set_custom_tolerance_percent("5.01").risky);
    }

    #[test]
    fn test_custom_rejected_keeps_state() {
        let mut slippage = controller();
        slippage.set_custom_tolerance_percent("1.25");

        let rejected = slippage.set_custom_tolerance_percent("1.255");
        assert!(!rejected.accepted);
        assert_eq!(rejected.tolerance_bps, None);
        assert_eq!(slippage.tolerance_bps(), 125);
        assert_eq!(slippage.custom_text(), "1.25");
    }

    #[test]
    fn test_custom_without_number_commits_nothing() {
        let mut slippage = controller();
        slippage.set_custom_tolerance_percent("3");

        for text in ["", "."] {
            let outcome = slippage.set_custom_tolerance_percent(text);
            assert!(outcome.accepted);
            assert_eq!(outcome.tolerance_bps, None);
            assert_eq!(slippage.tolerance_bps(), 300);
            assert_eq!(slippage.custom_text(), text);
        }
    }

    #[test]
    fn test_custom_comma_input() {
        let mut slippage = controller();
        assert_eq!(slippage.set_custom_tolerance_percent("0,75").tolerance_bps, Some(75));
        assert_eq!(slippage.custom_text(), "0.75");
    }

    #[test]
    fn test_typed_preset_value_reconciles_to_preset() {
        let mut slippage = controller();
        slippage.set_custom_tolerance_percent("0.1");
        assert_eq!(slippage.preset_state(), PresetState::Preset(Preset::Low));
    }

    #[test]
    fn test_external_set_reconciles() {
        let mut slippage = controller();
        slippage.set_custom_tolerance_percent("7");
        assert_eq!(slippage.preset_state(), PresetState::Custom);

        slippage.set_tolerance_bps(100);
        assert_eq!(slippage.preset_state(), PresetState::Preset(Preset::Medium));
        assert_eq!(slippage.custom_text(), "");

        slippage.set_tolerance_bps(35);
        assert_eq!(slippage.preset_state(), PresetState::Custom);
        assert_eq!(slippage.custom_text(), "0.35");
    }

    #[test]
    fn test_initial_custom_value_is_back_filled() {
        let slippage =
            SlippageToleranceController::new(SlippagePresets::default(), RiskThresholds::default(), 75);
        assert_eq!(slippage.custom_text(), "0.75");
        assert_eq!(slippage.active_index(), 4);
    }

    #[test]
    fn test_reconcile() {
        let presets = SlippagePresets::new(10, 100, 200);
        assert_eq!(reconcile(10, &presets), PresetState::Preset(Preset::Low));
        assert_eq!(reconcile(100, &presets), PresetState::Preset(Preset::Medium));
        assert_eq!(reconcile(200, &presets), PresetState::Preset(Preset::High));
        assert_eq!(reconcile(0, &presets), PresetState::Custom);
        assert_eq!(reconcile(101, &presets), PresetState::Custom);
    }

    /// Every string of up to two digits, including the empty one.
    fn digit_strings() -> Vec<String> {
        let mut out = vec![String::new()];
        for a in 0..10 {
            out.push(a.to_string());
            for b in 0..10 {
                out.push(format!("{a}{b}"));
            }
        }
        out
    }

    #[test]
    fn test_percent_round_trip() {
        let digits = digit_strings();
        let mut inputs: Vec<String> = digits.iter().filter(|d| !d.is_empty()).cloned().collect();
        for int in &digits {
            for frac in &digits {
                if !(int.is_empty() && frac.is_empty()) {
                    inputs.push(format!("{int}.{frac}"));
                }
            }
        }
        assert_eq!(inputs.len(), 12_430);

        let mut slippage = controller();
        for input in &inputs {
            let outcome = slippage.set_custom_tolerance_percent(input);
            assert!(outcome.accepted, "{input:?} rejected");
            let bps = outcome.tolerance_bps.unwrap();
            assert_eq!(slippage.tolerance_bps(), bps);

            let expected = decimal_from_text(input).unwrap();
            let read_back = decimal_from_text(&bps_to_percent_string(bps)).unwrap();
            assert_eq!(read_back, expected, "round trip of {input:?}");
        }
    }

    #[test]
    fn test_bps_to_percent_string() {
        assert_eq!(bps_to_percent_string(150), "1.5");
        assert_eq!(bps_to_percent_string(600), "6");
        assert_eq!(bps_to_percent_string(5), "0.05");
        assert_eq!(bps_to_percent_string(0), "0");
    }

    #[test]
    fn test_max_custom_bps() {
        let mut slippage = controller().with_max_custom_bps(Some(5000));

        let over = slippage.set_custom_tolerance_percent("50");
        assert!(over.accepted);
        assert_eq!(over.tolerance_bps, None);
        assert_eq!(slippage.tolerance_bps(), 200);
        assert_eq!(slippage.warning(), Some(SlippageWarning::InvalidInput));

        assert_eq!(slippage.set_custom_tolerance_percent("49.99").tolerance_bps, Some(4999));
    }

    #[test]
    fn test_warning() {
        let mut slippage = controller();

        slippage.select_preset(Preset::Low);
        assert_eq!(slippage.warning(), Some(SlippageWarning::RiskyLow));

        slippage.select_preset(Preset::Medium);
        assert_eq!(slippage.warning(), None);

        slippage.set_custom_tolerance_percent("8");
        assert_eq!(slippage.warning(), Some(SlippageWarning::RiskyHigh));
        assert_eq!(
            slippage.warning().map(|w| w.message()),
            Some("Your transaction may be frontrun")
        );

        slippage.set_custom_tolerance_percent(".");
        assert_eq!(slippage.warning(), Some(SlippageWarning::InvalidInput));

        slippage.blur();
        assert_eq!(slippage.custom_text(), "8");
        assert_eq!(slippage.warning(), Some(SlippageWarning::RiskyHigh));
    }
}
