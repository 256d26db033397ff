//! Process-wide tracing setup for the backend binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// The access-log stage already emits one line per request, so the ORM's
// per-query chatter stays at warn unless RUST_LOG asks for it.
const DEFAULT_DIRECTIVES: &str = "info,sea_orm=warn,sqlx::query=warn";

/// Install the global JSON subscriber. RUST_LOG overrides the defaults.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let fmt_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
