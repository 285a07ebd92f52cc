use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default CLI filter. `--verbose` opens this crate's debug events only.
pub fn cli_directive(verbose: bool) -> &'static str {
    if verbose {
        "brew_gravity=debug,warn"
    } else {
        "brew_gravity=warn"
    }
}

/// `RUST_LOG` wins over `default_directive` when set.
fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

pub fn init_cli_logger(verbose: bool) {
    // Reports go to stdout, so logs stay on stderr.
    tracing_subscriber::registry()
        .with(env_filter(cli_directive(verbose)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}

pub fn init_lambda_logger() {
    tracing_subscriber::registry()
        .with(env_filter("brew_gravity=info,lambda_runtime=warn"))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .json(), // CloudWatch indexes one JSON object per line
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_directive_parses() {
        for verbose in [false, true] {
            let directive = cli_directive(verbose);
            assert!(EnvFilter::try_new(directive).is_ok(), "{directive}");
        }
        assert!(cli_directive(true).starts_with("brew_gravity=debug"));
        assert_eq!(cli_directive(false), "brew_gravity=warn");
    }
}
