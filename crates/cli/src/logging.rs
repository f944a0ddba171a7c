//! Diagnostic logging to stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter, e.g. `JSONDOCS_LOG=jsondocs::store=debug`.
pub const LOG_ENV: &str = "JSONDOCS_LOG";

/// Initialize logging from `$JSONDOCS_LOG`, defaulting to `warn`.
pub fn set_up_logging() {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    let filter_layer = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
