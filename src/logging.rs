use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// A non-empty `RUST_LOG` wins; otherwise the `-v` count picks the level.
/// Calling this more than once is harmless.
pub fn init_logging(verbose: u8) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(rustlog) if !rustlog.is_empty() => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(verbose)))
        }
        _ => EnvFilter::new(default_level(verbose)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .without_time()
        .compact()
        .try_init();
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
