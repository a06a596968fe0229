//! Environment-driven client configuration.

use std::path::PathBuf;
use std::time::Duration;

use reminder_api::types::DEFAULT_LIMIT;

use crate::validation;

pub const ENV_API_URL: &str = "REMINDER_API_URL";
pub const ENV_STATE_DIR: &str = "REMINDER_STATE_DIR";
pub const ENV_PAGE_SIZE: &str = "REMINDER_PAGE_SIZE";
pub const ENV_TIMEOUT_SECS: &str = "REMINDER_TIMEOUT_SECS";

pub const DEFAULT_STATE_DIR: &str = ".reminders";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub base_url: String,
    /// Directory holding the persisted token and last list view.
    pub state_dir: PathBuf,
    pub page_size: i64,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: reminder_api::DEFAULT_BASE_URL.to_string(),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            page_size: DEFAULT_LIMIT,
            timeout: reminder_api::DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Reads the `REMINDER_*` variables. Unset or malformed values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            base_url: non_empty(ENV_API_URL).unwrap_or(defaults.base_url),
            state_dir: non_empty(ENV_STATE_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.state_dir),
            page_size: non_empty(ENV_PAGE_SIZE)
                .and_then(|v| v.trim().parse::<i64>().ok())
                .and_then(|n| validation::validate_page_size(n).ok())
                .unwrap_or(defaults.page_size),
            timeout: non_empty(ENV_TIMEOUT_SECS)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|n| *n > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn reads_all_values() {
        let cfg = Config::from_lookup(lookup(&[
            ("REMINDER_API_URL", "https://reminders.example.com/api"),
            ("REMINDER_STATE_DIR", "/tmp/rem"),
            ("REMINDER_PAGE_SIZE", "10"),
            ("REMINDER_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(cfg.base_url, "https://reminders.example.com/api");
        assert_eq!(cfg.state_dir, PathBuf::from("/tmp/rem"));
        assert_eq!(cfg.page_size, 10);
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn malformed_numbers_fall_back() {
        let cfg = Config::from_lookup(lookup(&[
            ("REMINDER_PAGE_SIZE", "lots"),
            ("REMINDER_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(cfg.page_size, 5);
        assert_eq!(cfg.timeout, Duration::from_secs(30));

        let cfg = Config::from_lookup(lookup(&[("REMINDER_PAGE_SIZE", "500")]));
        assert_eq!(cfg.page_size, 5);
    }

    #[test]
    fn page_size_outside_range_falls_back() {
        for raw in ["0", "-3", "101"] {
            let cfg = Config::from_lookup(lookup(&[("REMINDER_PAGE_SIZE", raw)]));
            assert_eq!(cfg.page_size, 5, "page size {}", raw);
        }
        let cfg = Config::from_lookup(lookup(&[("REMINDER_PAGE_SIZE", "100")]));
        assert_eq!(cfg.page_size, 100);
    }

    #[test]
    fn flag_overrides_env() {
        let cfg = Config::from_lookup(lookup(&[("REMINDER_API_URL", "http://env")]))
            .with_base_url(Some("http://flag"));
        assert_eq!(cfg.base_url, "http://flag");
    }
}
