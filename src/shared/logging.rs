use tracing::Level;

/// Installs the global fmt subscriber. Safe to call more than once; later
/// calls are no-ops.
pub fn initialize_logging(log_level: &str) {
    let level = match log_level.to_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    };
    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialization_is_idempotent() {
        initialize_logging("DEBUG");
        initialize_logging("not-a-level");
    }
}
