//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process, before config loads
//! - Apply the configured level once the config is known
//! - Keep stdout free for the walkthrough report
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured level
//! - Log events go to stderr

use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Level used until the configuration has been loaded.
pub const BOOTSTRAP_LEVEL: &str = "info";

/// Default filter directive for a configured level.
pub fn default_directive(log_level: &str) -> String {
    format!("columbus_claim={}", log_level)
}

/// Handle to the installed filter.
pub struct LogHandle {
    /// `None` when another subscriber was already installed.
    handle: Option<reload::Handle<EnvFilter, Registry>>,
    /// `RUST_LOG` was set and takes precedence over the config.
    from_env: bool,
}

impl LogHandle {
    /// Switch to the configured level. No-op when `RUST_LOG` is set.
    pub fn set_level(&self, log_level: &str) {
        if self.from_env {
            return;
        }
        let Some(handle) = &self.handle else {
            return;
        };

        match handle.reload(EnvFilter::new(default_directive(log_level))) {
            Ok(()) => tracing::debug!(log_level, "Log level applied"),
            Err(e) => tracing::warn!(error = %e, "Failed to apply log level"),
        }
    }
}

/// Install the global subscriber.
pub fn init(log_level: &str) -> LogHandle {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_directive(log_level)), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    // A subscriber may already be installed (e.g. by a test harness).
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok();

    LogHandle {
        handle: installed.then_some(handle),
        from_env,
    }
}
