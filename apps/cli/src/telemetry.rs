use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout stays clean for JSON and CSV output.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "advsearch=info,advs=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
