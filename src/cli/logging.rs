//! Log initialization
//!
//! `RUST_LOG` wins; otherwise `--verbose` selects `debug`, and the
//! configured level applies. Logs go to stderr so command output stays
//! clean.

use tracing_subscriber::EnvFilter;

use crate::storage::LoggingConfig;

pub fn init(config: &LoggingConfig, verbose: bool) {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let level = if verbose { "debug" } else { config.level.as_str() };
            EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    };

    // A subscriber may already be installed (tests, embedding hosts)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
