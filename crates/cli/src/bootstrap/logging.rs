use rootwalk_domain::Config;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout carries only the answer. `RUST_LOG` takes
/// precedence over the configured level.
pub fn init_logging(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(&config.logging.level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
