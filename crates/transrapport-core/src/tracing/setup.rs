//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "TRANSRAPPORT_LOG";

const DEFAULT_FILTER: &str = "transrapport=info";

static INIT: Once = Once::new();

/// Initialize logging for the TransRapport crates.
///
/// Reads `TRANSRAPPORT_LOG` for per-crate levels, e.g.
/// `TRANSRAPPORT_LOG=transrapport_markers=debug,transrapport_rapport=warn`.
/// Falls back to `transrapport=info` when unset or unparsable.
///
/// Idempotent. If the host application already installed a global
/// subscriber, that one is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
