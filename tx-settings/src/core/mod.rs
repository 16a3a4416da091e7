//! # Core Abstractions
//!
//! Error types shared by every module.
//!
//! ## Modules
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)

pub mod error;

pub use error::{AppError, Result};
