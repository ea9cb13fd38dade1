use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pages::DEFAULT_BASE_URL;
use crate::query::DEFAULT_TIMEOUT;

pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Run settings, read from the environment.
///
/// | Variable                 | Default                                |
/// |--------------------------|----------------------------------------|
/// | `TALENTOLAB_BASE_URL`    | `https://talentolab-test.netlify.app`  |
/// | `WEBDRIVER_URL`          | `http://localhost:4444`                |
/// | `TALENTOLAB_API_URL`     | `https://jsonplaceholder.typicode.com` |
/// | `TALENTOLAB_REPORTS_DIR` | `reports`                              |
/// | `TALENTOLAB_HEADLESS`    | `false`                                |
/// | `TALENTOLAB_TIMEOUT_SECS`| `10`                                   |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub webdriver_url: String,
    pub api_url: String,
    pub reports_dir: PathBuf,
    pub headless: bool,
    /// How long page interactions wait for their element.
    pub wait_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            headless: false,
            wait_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Settings {
            base_url: var("TALENTOLAB_BASE_URL").unwrap_or(defaults.base_url),
            webdriver_url: var("WEBDRIVER_URL").unwrap_or(defaults.webdriver_url),
            api_url: var("TALENTOLAB_API_URL").unwrap_or(defaults.api_url),
            reports_dir: var("TALENTOLAB_REPORTS_DIR").map(PathBuf::from).unwrap_or(defaults.reports_dir),
            headless: var("TALENTOLAB_HEADLESS").map_or(defaults.headless, |v| parse_flag(&v)),
            wait_timeout: var("TALENTOLAB_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .map_or(defaults.wait_timeout, Duration::from_secs),
        }
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.reports_dir.join("logs")
    }

    pub fn screenshots_dir(&self) -> PathBuf {
        self.reports_dir.join("screenshots")
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_when_unset() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.logs_dir(), PathBuf::from("reports/logs"));
        assert_eq!(settings.screenshots_dir(), PathBuf::from("reports/screenshots"));
    }

    #[test]
    fn overrides_from_environment() {
        let vars: HashMap<&str, &str> = [
            ("TALENTOLAB_BASE_URL", "http://localhost:8080"),
            ("WEBDRIVER_URL", "http://grid:4444"),
            ("TALENTOLAB_REPORTS_DIR", "/tmp/out"),
            ("TALENTOLAB_HEADLESS", "True"),
            ("TALENTOLAB_API_URL", "  "),
            ("TALENTOLAB_TIMEOUT_SECS", "25"),
        ]
        .iter()
        .cloned()
        .collect();
        let settings = Settings::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(settings.base_url, "http://localhost:8080");
        assert_eq!(settings.webdriver_url, "http://grid:4444");
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.screenshots_dir(), PathBuf::from("/tmp/out/screenshots"));
        assert!(settings.headless);
        assert_eq!(settings.wait_timeout, Duration::from_secs(25));
    }

    #[test]
    fn unparsable_timeout_keeps_default() {
        let settings = Settings::from_lookup(|k| match k {
            "TALENTOLAB_TIMEOUT_SECS" => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(settings.wait_timeout, DEFAULT_TIMEOUT);
    }
}
