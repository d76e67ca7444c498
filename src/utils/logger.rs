use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

static INIT: Once = Once::new();

/// Installs the global `tracing` subscriber.
///
/// The level comes from the `LOGLEVEL` environment variable (`DEBUG`,
/// `INFO`, `WARN`, `ERROR`, `TRACE`; default `INFO`). Calling it more than
/// once is harmless, which lets tests call it freely.
pub fn setup_logger() {
    INIT.call_once(|| {
        let level = parse_level(&env::var("LOGLEVEL").unwrap_or_else(|_| "INFO".to_string()));

        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(false)
            .finish();

        if tracing::subscriber::set_global_default(subscriber).is_err() {
            tracing::debug!("Global tracing subscriber already installed");
        }
    });
}

/// Maps a level name to a [`Level`], defaulting to `INFO`
#[must_use]
pub fn parse_level(name: &str) -> Level {
    match name.trim().to_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" | "WARNING" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    }
}
