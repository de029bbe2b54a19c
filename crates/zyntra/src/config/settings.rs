//! Backend endpoints and polling knobs
//!
//! Loaded from `config.toml` in the config directory. Every field has a
//! default so a missing file or a partial file is fine.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, ZyntraError};

const DEFAULT_AUTH_BASE_URL: &str = "https://zyntra-backend.azurewebsites.net/api";
const DEFAULT_API_BASE_URL: &str = "https://aaa95094eca4.ngrok-free.app";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the auth service (`/auth/login`, `/auth/register`)
    pub auth_base_url: String,
    /// Base URL of the wellness, gait and posture service
    pub api_base_url: String,
    /// Seconds between two job status checks
    pub poll_interval_secs: u64,
    /// Status checks before a job is reported as timed out
    pub max_poll_attempts: u32,
    /// Non-2xx status checks tolerated before giving up
    pub max_failed_status_checks: u32,
    /// HTML responses tolerated before giving up
    pub max_non_json_responses: u32,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            poll_interval_secs: 2,
            max_poll_attempts: 150,
            max_failed_status_checks: 10,
            max_non_json_responses: 5,
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Load settings from the default config directory
    pub fn load() -> Result<Self> {
        let path = super::config_file()?;
        Self::load_from(&path)
    }

    /// Load settings from an explicit file, falling back to defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply command-line / environment overrides
    pub fn with_overrides(mut self, auth_url: Option<String>, api_url: Option<String>) -> Result<Self> {
        if let Some(url) = auth_url {
            self.auth_base_url = url;
        }
        if let Some(url) = api_url {
            self.api_base_url = url;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that both base URLs parse as http(s) URLs
    pub fn validate(&self) -> Result<()> {
        for (name, raw) in [
            ("auth_base_url", &self.auth_base_url),
            ("api_base_url", &self.api_base_url),
        ] {
            let parsed = url::Url::parse(raw)
                .map_err(|e| ZyntraError::config(format!("{} '{}': {}", name, raw, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ZyntraError::config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, raw
                )));
            }
        }
        if self.max_poll_attempts == 0 {
            return Err(ZyntraError::config("max_poll_attempts must be at least 1"));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
