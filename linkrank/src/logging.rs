use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber, writing to stderr.
///
/// `RUST_LOG` is honoured when set; otherwise only warnings are shown.
/// `verbose` forces debug output for the linkrank crates.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,linkrank=debug,linkrank_core=debug,linkrank_scanner=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed (e.g. by tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
