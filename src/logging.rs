use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` wins; otherwise `debug`
/// selects between debug and info for this crate and the HTTP layer.
pub fn init_tracing(debug: bool) {
    let fallback = if debug {
        "mfitness_api=debug,tower_http=debug,info"
    } else {
        "mfitness_api=info,tower_http=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // stderr keeps `mfit --json` output on stdout parseable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
