//! Diagnostics go to stderr through `tracing`; command output stays on stdout.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the global subscriber. `RUST_LOG` wins over `debug` when set.
/// Later calls are ignored.
pub fn init(debug: bool) {
    INIT.call_once(|| {
        let default_level = if debug { "txbrowse=debug" } else { "txbrowse=warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
