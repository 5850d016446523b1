//! Logging backend.
//!
//! The library crates log through the `log` facade. The CLI installs a
//! `tracing_subscriber` fmt subscriber, which also captures `log` records,
//! writing to stderr. `LOXPAD_LOG` overrides the configured level with
//! full `EnvFilter` directives.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Environment variable holding filter directives.
pub const LOG_ENV_VAR: &str = "LOXPAD_LOG";

/// Map a `log` level to the subscriber's level.
pub fn level_filter(level: log::LevelFilter) -> LevelFilter {
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

/// Filter with `level` as the default directive.
pub fn env_filter(level: log::LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_filter(level).into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy()
}

/// Install the subscriber. Later calls leave the first one in place.
pub fn init(level: log::LevelFilter) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if let Err(e) = installed {
        log::debug!("[loxpad] logging already initialized: {}", e);
    }
}
