//! Logging infrastructure for promptsync.
//!
//! This module initializes the tracing subscriber for structured logging.
//! All logs are emitted to stderr so that the progress lines the workflows
//! print on stdout stay readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Default filter when neither `RUST_LOG` nor an override is given.
///
/// Workflow progress is printed directly, so only warnings are logged unless
/// the user asks for more.
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber: an env filter plus a stderr fmt layer.
///
/// `log_level` wins over `RUST_LOG`; ANSI colors are off when `no_color` is
/// set or `NO_COLOR` is present.
///
/// # Example
/// ```no_run
/// use promptsync_core::logging::init_logging;
///
/// init_logging(None, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> AppResult<()> {
    let directives = filter_directives(log_level, std::env::var("RUST_LOG").ok());
    let env_filter = EnvFilter::try_new(&directives)
        .map_err(|e| AppError::Config(format!("Invalid log filter '{}': {}", directives, e)))?;

    let ansi = !no_color && std::env::var_os("NO_COLOR").is_none();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(ansi))
        .try_init()
        .map_err(|e| AppError::Config(format!("Logging already initialized: {}", e)))
}

fn filter_directives(log_level: Option<&str>, rust_log: Option<String>) -> String {
    log_level
        .map(str::to_string)
        .or(rust_log.filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}
