//! # Transaction Settings - Library Root
//!
//! Input handling and state for the transaction settings panel of a swap
//! front-end: slippage tolerance, transaction deadline, preferred gas price
//! and multihop routing. Rendering is left to the host; this crate decides
//! what a keystroke or click commits.
//!
//! ## Architecture
//!
//! ```text
//! keystroke / click
//!   │
//!   ├── handlers            (shared Arc<RwLock<SettingsState>>, logging)
//!   │     └── state         (SettingsState, TransactionSettings, JSON file)
//!   │           └── model   (slippage, deadline, gas controllers)
//!   │                 └── lib_utils::validation (numeric input grammar)
//!   │
//!   └── TransactionSettings ──► trade construction (bps, seconds, wei)
//! ```
//!
//! All transitions are synchronous. The lock only exists so a host with
//! background tasks can read the committed settings.
//!
//! ## Usage
//!
//! ```rust
//! use tx_settings::handlers;
//! use tx_settings::model::slippage::Preset;
//! use tx_settings::SettingsConfig;
//!
//! let state = handlers::load_settings(SettingsConfig::default());
//!
//! handlers::handle_preset_click(&state, Preset::Low);
//! let custom = handlers::handle_slippage_input(&state, "6");
//! assert_eq!(custom.tolerance_bps, Some(600));
//! assert!(custom.risky);
//!
//! let update = handlers::handle_deadline_input(&state, "15");
//! assert_eq!(update.deadline_seconds, Some(900));
//! ```
//!
//! ## Modules
//!
//! - **core**: Error types
//! - **config**: Environment configuration
//! - **logger**: Tracing subscriber setup
//! - **model**: Per-field controllers
//! - **state**: Panel state and persistence
//! - **handlers**: UI event entry points

pub mod config;
pub mod core;
pub mod handlers;
pub mod logger;
pub mod model;
pub mod state;

pub use config::SettingsConfig;
pub use core::{AppError, Result};
pub use state::{SettingsState, TransactionSettings};
