use tracing_subscriber::EnvFilter;

/// Install the global subscriber and route `log` records through it.
///
/// `RUST_LOG` wins over `default_level`. Output goes to stderr so stdout
/// stays reserved for command output.
pub fn init(default_level: &str) {
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to bridge log records: {}", e);
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install log subscriber: {}", e);
    }
}
