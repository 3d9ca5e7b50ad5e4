//! Structured logging for the diorama generator.
//!
//! Console output with uptime timestamps and targets, filterable through
//! `RUST_LOG`, plus a JSON log file in debug builds.

use std::fs::File;
use std::path::Path;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// File name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "diorama.log";

/// Filter directive used when neither `RUST_LOG` nor `level` is given.
fn filter_directive(level: Option<&str>) -> String {
    match level {
        Some(level) if !level.trim().is_empty() => level.trim().to_string(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `level`. In debug builds with a `log_dir`, events are
/// also written as JSON to `log_dir/diorama.log`; failure to create that
/// file silently falls back to console-only logging.
///
/// # Examples
///
/// ```no_run
/// use diorama_log::init_logging;
///
/// init_logging(None, false, None);
/// init_logging(Some(std::path::Path::new("./logs")), true, Some("debug"));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, level: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build && let Some(log_file) = log_dir.and_then(open_log_file) {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create `log_dir` if needed and truncate the log file inside it.
fn open_log_file(log_dir: &Path) -> Option<File> {
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join(LOG_FILE_NAME)).ok()
}

/// The filter used when nothing else is configured.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert!(format!("{}", default_env_filter()).contains("info"));
    }

    #[test]
    fn test_level_override() {
        assert_eq!(filter_directive(Some("debug")), "debug");
        assert_eq!(filter_directive(Some(" warn ")), "warn");
        assert_eq!(filter_directive(Some("")), "info", "blank level falls back");
        assert_eq!(filter_directive(None), "info");
    }

    #[test]
    fn test_crate_directives_parse() {
        for level in [
            Some("debug,diorama_scatter=trace"),
            Some(" warn,diorama_context=debug,diorama_terrain=info "),
            None,
        ] {
            let directive = filter_directive(level);
            assert!(
                EnvFilter::try_new(&directive).is_ok(),
                "failed to parse filter: {directive}"
            );
        }
    }

    #[test]
    fn test_open_log_file_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");
        assert!(open_log_file(&log_dir).is_some());
        assert!(log_dir.join(LOG_FILE_NAME).is_file());
    }

    #[test]
    fn test_open_log_file_truncates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(LOG_FILE_NAME), "stale run").unwrap();
        assert!(open_log_file(dir.path()).is_some());
        let len = std::fs::metadata(dir.path().join(LOG_FILE_NAME)).unwrap().len();
        assert_eq!(len, 0, "previous log is discarded");
    }

    #[test]
    fn test_open_log_file_fails_on_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("plain");
        std::fs::write(&not_a_dir, "").unwrap();
        assert!(open_log_file(&not_a_dir).is_none(), "a file cannot host the log dir");
    }
}
