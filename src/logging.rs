//! Diagnostics sink.
//!
//! The screen belongs to the widgets, so logs go to the file named by
//! `CLUI_WRITE_LOG`. Without it no subscriber is installed and the `tracing`
//! macros stay no-ops.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;

/// Installs the global file subscriber described by `config`.
///
/// Returns `Ok(false)` when no log file is configured or another subscriber is
/// already installed.
pub fn init_logging(config: &EnvConfig) -> io::Result<bool> {
    let Some(path) = config.write_log.as_deref() else {
        return Ok(false);
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = build_env_filter(config, std::env::var("RUST_LOG").ok().as_deref());

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();
    Ok(installed)
}

/// Priority: `CLUI_LOG` > `RUST_LOG` > `debug` when `CLUI_DEBUG=1` > `warn`.
/// Unparseable directives fall through to the next source.
fn build_env_filter(config: &EnvConfig, rust_log: Option<&str>) -> EnvFilter {
    let candidates = [config.log_filter.as_deref(), rust_log];
    for directives in candidates.into_iter().flatten() {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return filter;
        }
    }
    EnvFilter::new(default_level(config))
}

fn default_level(config: &EnvConfig) -> &'static str {
    if config.debug {
        "debug"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::{build_env_filter, default_level, init_logging};
    use crate::config::EnvConfig;

    #[test]
    fn project_filter_wins_over_rust_log() {
        let config = EnvConfig {
            log_filter: Some("clui=trace".to_string()),
            ..EnvConfig::default()
        };
        let filter = build_env_filter(&config, Some("error"));
        assert_eq!(filter.to_string(), "clui=trace");
    }

    #[test]
    fn rust_log_is_used_when_project_filter_is_invalid() {
        let config = EnvConfig {
            log_filter: Some("=[not valid".to_string()),
            ..EnvConfig::default()
        };
        let filter = build_env_filter(&config, Some("info"));
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn debug_flag_raises_the_default_level() {
        let quiet = EnvConfig::default();
        let loud = EnvConfig {
            debug: true,
            ..EnvConfig::default()
        };
        assert_eq!(default_level(&quiet), "warn");
        assert_eq!(default_level(&loud), "debug");
    }

    #[test]
    fn no_log_file_installs_nothing() {
        assert!(!init_logging(&EnvConfig::default()).unwrap());
    }
}
