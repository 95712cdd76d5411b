//! Log output for the CLI.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,line_messaging=info";
const VERBOSE_FILTER: &str = "info,line_messaging=debug,line_cli=debug";

/// Install the global subscriber. `RUST_LOG` wins over `--verbose`.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init(verbose: bool, json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })
    });

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(verbose)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
