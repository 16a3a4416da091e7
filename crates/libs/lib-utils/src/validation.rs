//! # Numeric Input Validation
//!
//! Keystroke-level gatekeeping for numeric text fields (slippage percent,
//! deadline minutes, token and gas amounts).
//!
//! The host passes the full field value after every keystroke. The value is
//! only committed when it matches the field's [`InputGrammar`]; anything else
//! is silently dropped so the field keeps showing the last accepted text.
//!
//! ## Normalization
//!
//! Before matching:
//!
//! 1. An optional prepend symbol (e.g. `$`) is stripped from the front.
//! 2. Every `,` is rewritten to `.` so locales with a decimal comma work.
//!
//! The accepted value handed to the caller is the normalized text, without
//! the prepend symbol. Use [`NumericInput::display`] to put it back.
//!
//! ## Example
//!
//! ```rust
//! use lib_utils::validation::enforce_numeric_text;
//!
//! let mut committed = String::new();
//! assert!(enforce_numeric_text("0,5", |v| committed = v.to_string()));
//! assert_eq!(committed, "0.5");
//!
//! // Three integer digits are rejected; `committed` is untouched.
//! assert!(!enforce_numeric_text("100", |v| committed = v.to_string()));
//! assert_eq!(committed, "0.5");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

// Only ASCII digits: `\d` would also admit other Unicode digit classes.
static DECIMAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{0,2}(?:\.[0-9]{0,2})?$").expect("valid decimal pattern"));
static INTEGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*$").expect("valid integer pattern"));
static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*(?:\.[0-9]*)?$").expect("valid amount pattern"));

/// Shape a numeric field is allowed to take while typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputGrammar {
    /// Up to two integer digits, optionally a `.` and up to two fraction digits.
    Decimal,
    /// Digits only.
    Integer,
    /// Any number of digits with at most one `.`.
    Amount,
}

impl InputGrammar {
    /// Check already-normalized text against the grammar. Empty text always matches.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            InputGrammar::Decimal => DECIMAL_RE.is_match(text),
            InputGrammar::Integer => INTEGER_RE.is_match(text),
            InputGrammar::Amount => AMOUNT_RE.is_match(text),
        }
    }
}

/// Rewrite every comma to a dot.
pub fn normalize_separators(raw: &str) -> String {
    raw.replace(',', ".")
}

/// A numeric text field: a grammar plus an optional display prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericInput {
    grammar: InputGrammar,
    prepend_symbol: Option<String>,
}

impl NumericInput {
    pub fn new(grammar: InputGrammar) -> Self {
        Self {
            grammar,
            prepend_symbol: None,
        }
    }

    /// Symbol shown in front of the value (e.g. a currency glyph).
    pub fn with_prepend_symbol(mut self, symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        self.prepend_symbol = (!symbol.is_empty()).then_some(symbol);
        self
    }

    pub fn grammar(&self) -> InputGrammar {
        self.grammar
    }

    /// Normalize `raw` and return it when it matches the grammar.
    pub fn sanitize(&self, raw: &str) -> Option<String> {
        let stripped = match &self.prepend_symbol {
            Some(symbol) => raw.strip_prefix(symbol.as_str()).unwrap_or(raw),
            None => raw,
        };
        let normalized = normalize_separators(stripped);

        if self.grammar.matches(&normalized) {
            Some(normalized)
        } else {
            tracing::trace!(raw, grammar = ?self.grammar, "Rejected numeric input");
            None
        }
    }

    /// Run `raw` through the field and call `on_accept` once with the
    /// normalized value if it is accepted.
    ///
    /// Returns `true` when the input was accepted. Rejected input never
    /// reaches `on_accept`.
    pub fn enforce<F>(&self, raw: &str, on_accept: F) -> bool
    where
        F: FnOnce(&str),
    {
        match self.sanitize(raw) {
            Some(accepted) => {
                on_accept(&accepted);
                true
            }
            None => false,
        }
    }

    /// Text to render for an accepted value, with the prepend symbol restored.
    pub fn display(&self, accepted: &str) -> String {
        match &self.prepend_symbol {
            Some(symbol) if !accepted.is_empty() => format!("{symbol}{accepted}"),
            _ => accepted.to_string(),
        }
    }
}

/// Enforce the two-digit decimal grammar used for percentages.
pub fn enforce_numeric_text<F>(raw: &str, on_accept: F) -> bool
where
    F: FnOnce(&str),
{
    NumericInput::new(InputGrammar::Decimal).enforce(raw, on_accept)
}

/// Enforce the digits-only grammar used for minute counts.
pub fn enforce_integer_text<F>(raw: &str, on_accept: F) -> bool
where
    F: FnOnce(&str),
{
    NumericInput::new(InputGrammar::Integer).enforce(raw, on_accept)
}
