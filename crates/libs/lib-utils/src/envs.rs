//! # Environment Variables
//!
//! Reading and parsing configuration values that arrive as environment
//! variables. Parsers take the raw value separately so callers can feed them
//! from any lookup, not just the process environment.

use std::env;
use std::str::FromStr;

/// Read an environment variable, treating unset and non-UTF-8 values as absent.
pub fn lookup_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Parse a single value.
pub fn parse_value<T: FromStr>(name: &'static str, raw: &str) -> Result<T, Error> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| Error::WrongFormat(name, raw.to_string()))
}

/// Parse a comma-separated list, ignoring blank entries.
pub fn parse_list<T: FromStr>(name: &'static str, raw: &str) -> Result<Vec<T>, Error> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_value(name, item))
        .collect()
}

/// `1`, `true`, `yes` and `on` (any case) are true; everything else is false.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// region:    --- Error
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("{0} has wrong format: {1:?}")]
    WrongFormat(&'static str, String),
}
// endregion: --- Error
