use tracing::Level;

/// Maps a configured level name to a tracing level. Unknown names fall back
/// to `INFO` so a typo in the config never silences the server.
pub fn parse_level(name: &str) -> Level {
    match name.trim().to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" | "warning" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Initialize tracing/logging for the application.
///
/// Installs a `fmt` subscriber capped at `level`. Safe to call more than once;
/// only the first call takes effect.
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        .with_target(false)
        .try_init();
}
