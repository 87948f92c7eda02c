pub use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Failed to install color_eyre")]
    ColorEyre(#[from] color_eyre::Report),
    #[error("Failed to install tracing-subscriber")]
    TracingSubscriber(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Install [`color_eyre`] error reporting and a [`tracing_subscriber`] logger.
///
/// The filter comes from `RUST_LOG`, falling back to `info`. Logs go to
/// stderr so stdout stays clean for JSON output.
pub fn setup() -> Result<(), LogError> {
    use tracing_subscriber::EnvFilter;

    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(LogError::TracingSubscriber)?;

    Ok(())
}
