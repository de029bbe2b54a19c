pub mod commands;

use serde::Serialize;

use crate::client::{AuthClient, WellnessClient};
use crate::config::{CredentialStore, Settings};
use crate::error::{Result, ZyntraError};

/// Output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Global flags every command receives
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub profile: Option<String>,
    pub auth_url: Option<String>,
    pub api_url: Option<String>,
    pub format: OutputFormat,
}

impl Context {
    pub fn settings(&self) -> Result<Settings> {
        Settings::load()?.with_overrides(self.auth_url.clone(), self.api_url.clone())
    }

    pub fn store(&self) -> Result<CredentialStore> {
        CredentialStore::new(self.profile.clone())
    }

    pub fn auth_client(&self, settings: &Settings) -> Result<AuthClient> {
        AuthClient::new(&settings.auth_base_url, settings.request_timeout())
    }

    /// Client for the stored session; fails when nobody is signed in
    pub fn client(&self, settings: &Settings) -> Result<WellnessClient> {
        let session = self
            .store()?
            .load()?
            .ok_or(ZyntraError::NotAuthenticated)?;
        WellnessClient::new(&settings.api_base_url, session, settings.request_timeout())
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Fixed-width text bar for 0..=100 values
pub fn bar(value: f64, width: usize) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
