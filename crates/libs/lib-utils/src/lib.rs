//! # Utilities Library
//!
//! Shared helpers for numeric input validation, environment variables and time.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{lookup_env, parse_flag, parse_list, parse_value};
pub use time::{deadline_from, format_time, minutes_to_seconds, now_utc};
pub use validation::{enforce_integer_text, enforce_numeric_text, InputGrammar, NumericInput};
