//! Logging initialization

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::SettingsConfig;

/// Initialize the logging system
///
/// Filter comes from `RUST_LOG`, falling back to the configured level. With
/// `file_log` set, output goes to `<log_dir>/tx-settings.log` with daily
/// rotation through a non-blocking writer; otherwise, or when the log
/// directory cannot be created, to stderr.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the program.
pub fn init(config: &SettingsConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("tx_settings=info,warn"));

    let mut guard = None;

    if config.file_log && log_dir_ready(&config.log_dir) {
        let file_appender = tracing_appender::rolling::daily(&config.log_dir, "tx-settings.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false); // No ANSI codes in log files

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .init();
        guard = Some(file_guard);
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .init();
    }

    tracing::info!(
        log_dir = %config.log_dir.display(),
        log_level = %config.log_level,
        file_log = config.file_log,
        "Logging initialized"
    );

    setup_panic_hook();
    guard
}

/// Create the log directory; on failure logging falls back to stderr
fn log_dir_ready(log_dir: &Path) -> bool {
    match fs::create_dir_all(log_dir) {
        Ok(()) => true,
        Err(e) => {
            eprintln!(
                "Warning: Failed to create log directory {}: {}. Logging to stderr.",
                log_dir.display(),
                e
            );
            false
        }
    }
}

/// Log panics before handing over to the default hook
fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic message".to_string()
        };

        tracing::error!(location = %location, message = %message, "Application panic");

        default_panic(panic_info);
    }));
}
