//! Logging setup for the binary
//!
//! Output goes to stderr so stdout carries only command output (CSV listings,
//! account numbers, fingerprints).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber
///
/// `RUST_LOG` overrides `default_level` when set, using `EnvFilter` directive
/// syntax (`rust_account_store=debug`). A second call is a no-op.
pub fn init_logging(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init();

    if installed.is_ok() {
        tracing::debug!(default_level, "logging initialized");
    }
}
