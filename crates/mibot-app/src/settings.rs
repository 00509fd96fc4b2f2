//! Console settings loaded from `config.toml`.
//!
//! Search order: an explicit `--config` path, then
//! `<config_dir>/mibot-console/config.toml`. A missing file is not an
//! error; every field has a default, so a partial file is fine too.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use mibot_core::prelude::*;

/// Default backend origin (the Flask bridge on the operator laptop).
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Validated robot websocket port used by the set-ip override.
pub const DEFAULT_ROBOT_PORT: u16 = 5000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Backend base origin, overridable from the CLI.
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,

    /// Battery poll period (active while the robot is found).
    pub battery_poll_ms: u64,

    /// Storage poll period (unconditional).
    pub storage_poll_ms: u64,

    /// Emergency-stop poll period (unconditional, never stopped).
    pub emergency_poll_ms: u64,

    /// Current-map poll period (active while navigation runs).
    pub current_map_poll_ms: u64,

    /// How long a notice stays in the notice bar.
    pub notice_ttl_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 10_000,
            battery_poll_ms: 30_000,
            storage_poll_ms: 30_000,
            emergency_poll_ms: 2_000,
            current_map_poll_ms: 2_000,
            notice_ttl_ms: 3_000,
        }
    }
}

impl Settings {
    /// Load settings, preferring `explicit_path` when given.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::ConfigNotFound { path: p.to_path_buf() });
                }
                p.to_path_buf()
            }
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };
        Self::from_file(&path)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn battery_poll_period(&self) -> Duration {
        Duration::from_millis(self.battery_poll_ms)
    }

    pub fn storage_poll_period(&self) -> Duration {
        Duration::from_millis(self.storage_poll_ms)
    }

    pub fn emergency_poll_period(&self) -> Duration {
        Duration::from_millis(self.emergency_poll_ms)
    }

    pub fn current_map_poll_period(&self) -> Duration {
        Duration::from_millis(self.current_map_poll_ms)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }
}

/// `<config_dir>/mibot-console/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mibot-console").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_backend_cadence() {
        let settings = Settings::default();
        assert_eq!(settings.battery_poll_ms, 30_000);
        assert_eq!(settings.storage_poll_ms, 30_000);
        assert_eq!(settings.emergency_poll_ms, 2_000);
        assert_eq!(settings.current_map_poll_ms, 2_000);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://10.0.0.2:5000\"").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.base_url, "http://10.0.0.2:5000");
        assert_eq!(settings.emergency_poll_ms, 2_000);
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "emergency_pol_ms = 500").unwrap();

        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Settings::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }
}
