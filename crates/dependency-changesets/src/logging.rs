use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `--verbose`.
pub(crate) fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
