use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "codeclip=debug"
    } else {
        "codeclip=warn"
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbose`. A second call is a no-op.
pub fn initialize_logger(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "codeclip=warn");
        assert_eq!(default_filter(true), "codeclip=debug");
    }

    #[test]
    fn test_initialize_twice_does_not_panic() {
        initialize_logger(false);
        initialize_logger(true);
    }
}
