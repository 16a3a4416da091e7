//! # Preferred Gas Price
//!
//! Gas price the user wants transactions submitted with. Either one of the
//! three live tiers (only offered on mainnet, where a gas price feed exists)
//! or a custom value typed in gwei and stored in wei.
//!
//! Tier prices come from the caller; this module never fetches them.

use lib_utils::{InputGrammar, NumericInput};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::decimal_from_text;

pub const WEI_PER_GWEI: u128 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GasPriceTier {
    Instant,
    Fast,
    Normal,
}

impl GasPriceTier {
    pub fn label(&self) -> &'static str {
        match self {
            GasPriceTier::Instant => "INSTANT",
            GasPriceTier::Fast => "FAST",
            GasPriceTier::Normal => "NORMAL",
        }
    }
}

impl std::str::FromStr for GasPriceTier {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "instant" => Ok(GasPriceTier::Instant),
            "fast" => Ok(GasPriceTier::Fast),
            "normal" => Ok(GasPriceTier::Normal),
            _ => Err(()),
        }
    }
}

/// Current tier prices in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasPrices {
    pub instant: u128,
    pub fast: u128,
    pub normal: u128,
}

impl GasPrices {
    pub fn wei(&self, tier: GasPriceTier) -> u128 {
        match tier {
            GasPriceTier::Instant => self.instant,
            GasPriceTier::Fast => self.fast,
            GasPriceTier::Normal => self.normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredGasPrice {
    Tier(GasPriceTier),
    Custom { wei: u128 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasPriceWarning {
    InvalidInput,
    RiskyLow,
}

impl GasPriceWarning {
    pub fn message(&self) -> &'static str {
        match self {
            GasPriceWarning::InvalidInput => "Enter a valid gas price",
            GasPriceWarning::RiskyLow => "Your transaction may fail",
        }
    }
}

/// Outcome of a keystroke in the custom gas box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasUpdate {
    pub accepted: bool,
    /// Newly committed custom price, `None` when nothing was committed.
    pub wei: Option<u128>,
}

/// Wei for accepted gwei text. Fractions of a wei are truncated.
pub fn gwei_text_to_wei(text: &str) -> Option<u128> {
    decimal_from_text(text)?
        .checked_mul(Decimal::from(WEI_PER_GWEI as u64))?
        .trunc()
        .to_u128()
}

/// Exact gwei text for a wei amount, without trailing zeros.
pub fn wei_to_gwei_string(wei: u128) -> String {
    i128::try_from(wei)
        .ok()
        .and_then(|wei| Decimal::try_from_i128_with_scale(wei, 9).ok())
        .map(|gwei| gwei.normalize().to_string())
        .unwrap_or_else(|| wei_to_gwei_rounded(wei).to_string())
}

/// Whole gwei, rounded half up.
pub fn wei_to_gwei_rounded(wei: u128) -> u128 {
    wei.saturating_add(WEI_PER_GWEI / 2) / WEI_PER_GWEI
}

#[derive(Debug, Clone)]
pub struct GasPriceController {
    preferred: Option<PreferredGasPrice>,
    input_text: String,
    mainnet: bool,
    input: NumericInput,
}

impl GasPriceController {
    pub fn new(mainnet: bool, preferred: Option<PreferredGasPrice>) -> Self {
        let mut controller = Self {
            preferred: None,
            input_text: String::new(),
            mainnet,
            input: NumericInput::new(InputGrammar::Amount),
        };
        controller.set_preferred(preferred);
        controller
    }

    pub fn preferred(&self) -> Option<PreferredGasPrice> {
        self.preferred
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn is_mainnet(&self) -> bool {
        self.mainnet
    }

    /// Click on a tier. Tiers only exist on mainnet; returns whether it was applied.
    pub fn select_tier(&mut self, tier: GasPriceTier) -> bool {
        if !self.mainnet {
            tracing::warn!(tier = tier.label(), "Gas price tier ignored off mainnet");
            return false;
        }
        self.preferred = Some(PreferredGasPrice::Tier(tier));
        self.input_text.clear();
        true
    }

    /// Double-click on a tier: unset it if it is the active one.
    pub fn clear_tier(&mut self, tier: GasPriceTier) -> bool {
        if self.preferred == Some(PreferredGasPrice::Tier(tier)) {
            self.preferred = None;
            self.input_text.clear();
            true
        } else {
            false
        }
    }

    /// Keystroke in the custom box, in gwei. Only positive values commit.
    pub fn set_custom_gwei(&mut self, raw: &str) -> GasUpdate {
        let Some(text) = self.input.sanitize(raw) else {
            return GasUpdate {
                accepted: false,
                wei: None,
            };
        };

        let committed = gwei_text_to_wei(&text).filter(|wei| *wei > 0);
        self.input_text = text;

        if let Some(wei) = committed {
            self.preferred = Some(PreferredGasPrice::Custom { wei });
            tracing::debug!(wei = %wei, "Custom gas price committed");
        }

        GasUpdate {
            accepted: true,
            wei: committed,
        }
    }

    /// Network switched. Tier preferences do not survive leaving mainnet.
    pub fn set_network(&mut self, mainnet: bool) {
        self.mainnet = mainnet;
        if !mainnet && matches!(self.preferred, Some(PreferredGasPrice::Tier(_))) {
            tracing::info!("Dropping gas price tier preference off mainnet");
            self.preferred = None;
        }
    }

    /// Preference changed from outside the box (load, reset).
    pub fn set_preferred(&mut self, preferred: Option<PreferredGasPrice>) {
        self.preferred = preferred;
        self.input_text.clear();
        self.set_network(self.mainnet);
    }

    /// Box lost focus: show the committed custom price, if any.
    pub fn blur(&mut self) {
        self.input_text = match self.preferred {
            Some(PreferredGasPrice::Custom { wei }) => wei_to_gwei_string(wei),
            _ => String::new(),
        };
    }

    /// Gas price to submit with, if one is set and resolvable.
    pub fn resolve_wei(&self, prices: Option<&GasPrices>) -> Option<u128> {
        match self.preferred? {
            PreferredGasPrice::Tier(tier) => prices.map(|p| p.wei(tier)),
            PreferredGasPrice::Custom { wei } => Some(wei),
        }
    }

    /// Whole-gwei hint shown in the empty custom box.
    pub fn placeholder_gwei(&self, prices: Option<&GasPrices>) -> String {
        self.resolve_wei(prices)
            .map(|wei| wei_to_gwei_rounded(wei).to_string())
            .unwrap_or_default()
    }

    pub fn warning(&self, prices: Option<&GasPrices>) -> Option<GasPriceWarning> {
        let custom = match self.preferred {
            Some(PreferredGasPrice::Custom { wei }) => Some(wei),
            _ => None,
        };

        if !self.input_text.is_empty() {
            match gwei_text_to_wei(&self.input_text) {
                Some(wei) if Some(wei) == custom => {}
                _ => return Some(GasPriceWarning::InvalidInput),
            }
        }

        match (custom, prices) {
            (Some(wei), Some(prices)) if wei <= prices.normal => Some(GasPriceWarning::RiskyLow),
            _ => None,
        }
    }
}
