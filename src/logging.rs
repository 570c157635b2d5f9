use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between `debug` and `info`
/// for this crate.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "review_sentiment=debug,tower_http=debug,info"
    } else {
        "review_sentiment=info,tower_http=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    // A second call (e.g. from tests) leaves the first subscriber in place.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
