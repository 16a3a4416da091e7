//! # Settings Model
//!
//! Controllers for each field of the transaction settings panel. Every
//! controller owns its committed value plus the text currently shown in its
//! input box, and accepts keystrokes through a [`lib_utils::NumericInput`].
//!
//! ## Modules
//!
//! - **[`slippage`]**: Slippage tolerance presets, custom entry and risk
//! - **[`deadline`]**: Transaction deadline in minutes
//! - **[`gas`]**: Preferred gas price tier or custom gwei value

pub mod deadline;
pub mod gas;
pub mod slippage;

use rust_decimal::Decimal;

/// Parse accepted numeric text as a decimal.
///
/// Text the grammars accept but that carries no number (`""`, `"."`) gives
/// `None`, as does anything too large for a `Decimal`.
pub(crate) fn decimal_from_text(text: &str) -> Option<Decimal> {
    if text.is_empty() || text == "." {
        return None;
    }

    let mut canonical = String::with_capacity(text.len() + 1);
    if text.starts_with('.') {
        canonical.push('0');
    }
    canonical.push_str(text.strip_suffix('.').unwrap_or(text));

    canonical.parse::<Decimal>().ok()
}
