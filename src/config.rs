//! Environment configuration.

use std::env;

#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// `CLUI_PLAIN=1` forces the plain backend even on a cell-addressable terminal.
    pub plain_backend: bool,
    pub debug: bool,
    pub write_log: Option<String>,
    /// `CLUI_LOG`, an `EnvFilter` directive string.
    pub log_filter: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            plain_backend: env_flag("CLUI_PLAIN"),
            debug: env_flag("CLUI_DEBUG"),
            write_log: env_string_opt("CLUI_WRITE_LOG"),
            log_filter: env_string_opt("CLUI_LOG"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::EnvConfig;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults_are_off() {
        let _lock = env_lock();
        let _g1 = set_env_guard("CLUI_PLAIN", None);
        let _g2 = set_env_guard("CLUI_DEBUG", None);
        let _g3 = set_env_guard("CLUI_WRITE_LOG", None);
        let _g4 = set_env_guard("CLUI_LOG", None);

        let config = EnvConfig::from_env();
        assert!(!config.plain_backend);
        assert!(!config.debug);
        assert!(config.write_log.is_none());
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn env_flags_set_to_one_enable() {
        let _lock = env_lock();
        let _g1 = set_env_guard("CLUI_PLAIN", Some("1"));
        let _g2 = set_env_guard("CLUI_DEBUG", Some("1"));
        let _g3 = set_env_guard("CLUI_WRITE_LOG", Some("/tmp/clui.log"));
        let _g4 = set_env_guard("CLUI_LOG", Some("clui=trace"));

        let config = EnvConfig::from_env();
        assert!(config.plain_backend);
        assert!(config.debug);
        assert_eq!(config.write_log.as_deref(), Some("/tmp/clui.log"));
        assert_eq!(config.log_filter.as_deref(), Some("clui=trace"));
    }

    #[test]
    fn flags_other_than_one_stay_off() {
        let _lock = env_lock();
        let _g1 = set_env_guard("CLUI_PLAIN", Some("yes"));
        let _g2 = set_env_guard("CLUI_WRITE_LOG", Some("  "));
        let config = EnvConfig::from_env();
        assert!(!config.plain_backend);
        assert!(config.write_log.is_none());
    }
}
