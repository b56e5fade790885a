//! Stderr tracing subscriber for the binary.

use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset.
pub fn derive_log_level(n_verbose: u8, if_quiet: bool) -> &'static str {
    match (if_quiet, n_verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Install the global fmt subscriber; a second call is a no-op.
pub fn init_logging(n_verbose: u8, if_quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(derive_log_level(n_verbose, if_quiet)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_flags_map_to_levels() {
        assert_eq!(derive_log_level(0, false), "info");
        assert_eq!(derive_log_level(1, false), "debug");
        assert_eq!(derive_log_level(4, false), "trace");
        assert_eq!(derive_log_level(2, true), "warn");
    }
}
