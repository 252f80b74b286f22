use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber for the CLI. The level comes from
/// `LOG_LEVEL` first (the variable the import tooling documents), then
/// `RUST_LOG`, then "info"; per-row import diagnostics print without
/// module targets to keep the report readable.
pub fn init_logging() -> Result<()> {
    let directives = resolve_directives(
        std::env::var("LOG_LEVEL").ok(),
        std::env::var("RUST_LOG").ok(),
    );
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn resolve_directives(log_level: Option<String>, rust_log: Option<String>) -> String {
    log_level
        .or(rust_log)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "info".to_string())
}

#[cfg(test)]
mod tests {
    use super::resolve_directives;

    #[test]
    fn log_level_wins_over_rust_log() {
        let directives =
            resolve_directives(Some("debug".to_string()), Some("warn".to_string()));
        assert_eq!(directives, "debug");
    }

    #[test]
    fn rust_log_is_the_fallback() {
        let directives = resolve_directives(None, Some("warn".to_string()));
        assert_eq!(directives, "warn");
    }

    #[test]
    fn unset_and_blank_default_to_info() {
        assert_eq!(resolve_directives(None, None), "info");
        assert_eq!(resolve_directives(Some("  ".to_string()), None), "info");
    }
}
