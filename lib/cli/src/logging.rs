//! Logging setup for the wasi-vfsgen CLI.

use is_terminal::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging based on the `$RUST_LOG` environment variable. Logs
/// are disabled when `$RUST_LOG` isn't set.
///
/// Diagnostics go to stderr so they never mix with an artifact emitted to
/// stdout.
pub fn set_up_logging() {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_ansi(should_emit_colors())
        .with_writer(std::io::stderr)
        .compact();

    let filter_layer = EnvFilter::builder().from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

/// Whether to emit ANSI escape codes for log formatting: only on a terminal,
/// and only when `NO_COLOR` is unset.
fn should_emit_colors() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}
