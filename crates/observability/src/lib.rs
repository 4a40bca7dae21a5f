//! Tracing and logging setup shared by embedding applications and tests.
//!
//! The domain crates only emit `tracing` events; nothing is printed until a
//! subscriber is installed through [`init`] or [`init_with`].

pub mod config;
pub mod tracing;

pub use config::{ConfigError, LogFormat, ObservabilityConfig};

/// Initialize process-wide tracing from the environment.
///
/// Falls back to the defaults when the environment is malformed. Safe to call
/// multiple times; subsequent calls become no-ops.
pub fn init() {
    let config = ObservabilityConfig::from_env().unwrap_or_default();
    tracing::init(&config);
}

/// Initialize process-wide tracing from an explicit configuration.
pub fn init_with(config: &ObservabilityConfig) {
    tracing::init(config);
}
