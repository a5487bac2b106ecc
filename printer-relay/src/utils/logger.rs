//! Logging Infrastructure
//!
//! Structured logging setup. Relay code only emits `tracing` events; the
//! subscriber installed here decides where they go (stdout text, stdout
//! JSON, or a daily rolling file).

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional JSON format and file output
///
/// `log_level` accepts `EnvFilter` directives, e.g. `info` or
/// `printer_relay=debug,tower_http=warn`.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let json = json.unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(level_filter(level))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided
    let appender = log_dir.and_then(|dir| {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            Some(tracing_appender::rolling::daily(dir_str, "printer-relay"))
        } else {
            None
        }
    });

    match (json, appender) {
        (true, Some(file)) => builder.json().with_writer(file).init(),
        (true, None) => builder.json().init(),
        (false, Some(file)) => builder.with_ansi(false).with_writer(file).init(),
        (false, None) => builder.init(),
    }
}

/// Parse `LOG_LEVEL` directives, falling back to `info` when they are invalid
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_accepts_directives() {
        let filter = level_filter("printer_relay=debug,tower_http=warn");
        let rendered = filter.to_string();
        assert!(rendered.contains("printer_relay=debug"));
        assert!(rendered.contains("tower_http=warn"));
    }

    #[test]
    fn test_level_filter_falls_back_to_info() {
        assert_eq!(level_filter("printer_relay=verbose").to_string(), "info");
    }
}
