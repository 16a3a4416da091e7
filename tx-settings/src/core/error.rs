//! # Common Error Types
//!
//! Consolidated error handling for the settings crate.
//!
//! Keystroke rejection is *not* an error: the sanitizer drops invalid text
//! silently and controllers report it through their return values. [`AppError`]
//! covers the paths that genuinely fail:
//!
//! - **Validation**: API misuse such as a preset index outside 1..=3
//! - **State**: Shared state that cannot be used as requested
//! - **Config**: Environment values that do not parse
//! - **Io** / **Json**: Settings file persistence
//!
//! ## Usage Pattern
//!
//! ```rust
//! use tx_settings::core::error::{AppError, Result};
//! use tx_settings::model::slippage::Preset;
//!
//! fn preset(n: u8) -> Result<Preset> {
//!     Preset::try_from(n)
//! }
//!
//! assert!(matches!(preset(4), Err(AppError::Validation(_))));
//! ```

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller passed a value the API does not accept.
    ///
    /// ```rust
    /// use tx_settings::core::error::AppError;
    ///
    /// let err = AppError::Validation("preset index 7 is not 1, 2 or 3".to_string());
    /// assert_eq!(err.to_string(), "Validation error: preset index 7 is not 1, 2 or 3");
    /// ```
    #[error("Validation error: {0}")]
    Validation(String),

    /// Settings state cannot serve the request.
    #[error("State error: {0}")]
    State(String),

    /// Configuration could not be read from the environment.
    #[error("Config error: {0}")]
    Config(String),

    /// Settings file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for the settings schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<lib_utils::time::Error> for AppError {
    fn from(err: lib_utils::time::Error) -> Self {
        AppError::Validation(err.to_string())
    }
}
