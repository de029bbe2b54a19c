mod credentials;
mod settings;

pub use credentials::{CredentialStore, StorageScope};
pub use settings::Settings;

use crate::error::{Result, ZyntraError};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "zyntra";
const CONFIG_FILENAME: &str = "config.toml";

/// Profile used when `--profile` is not given
pub const DEFAULT_PROFILE: &str = "default";

/// `~/.config/zyntra/config.toml` on Linux, `~/Library/Application Support/zyntra/config.toml` on macOS
pub fn config_file() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_DIR).join(CONFIG_FILENAME))
        .ok_or_else(|| ZyntraError::config("Could not determine config directory"))
}

/// Root under which each profile keeps its local and session scope files
pub fn sessions_root() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|p| p.join(APP_DIR))
        .ok_or_else(|| ZyntraError::config("Could not determine data directory"))
}

/// Directory holding one profile's scope files, created owner-only.
///
/// Profile names become a single path segment, so separators and `..` are rejected.
pub fn profile_dir(root: &Path, profile: &str) -> Result<PathBuf> {
    let valid = !profile.is_empty()
        && profile != "."
        && profile != ".."
        && !profile.contains(['/', '\\']);
    if !valid {
        return Err(ZyntraError::invalid_param(format!(
            "Invalid profile name '{}'",
            profile
        )));
    }

    let dir = root.join(profile);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o700))?;
        }
    }
    Ok(dir)
}
