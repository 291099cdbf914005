//! Path utilities for cabinet client files.
//!
//! # Base Directory
//! - [`get_cabinet_dir`] - `~/.cabinet/` (base directory for all client data)
//!
//! # Files
//! - [`get_config_path`] - `~/.cabinet/config.toml` (client settings)
//! - [`get_session_path`] - `~/.cabinet/session.json` (stored credential)

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::constants::HOME_ENV;

/// Get the cabinet base directory.
///
/// Resolution order:
/// 1. `CABINET_HOME` environment variable (if set)
/// 2. `~/.cabinet/` (default)
pub fn get_cabinet_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV)
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    let home = dirs::home_dir().context("Failed to get home directory")?;
    Ok(home.join(".cabinet"))
}

/// Get the config path: `~/.cabinet/config.toml`
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_cabinet_dir()?.join("config.toml"))
}

/// Get the session path: `~/.cabinet/session.json`
pub fn get_session_path() -> Result<PathBuf> {
    Ok(get_cabinet_dir()?.join("session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // CABINET_HOME is not exercised here: setting env vars needs `unsafe`
    // under edition 2024 and the crate denies unsafe code.

    #[test]
    fn test_derived_paths_structure() {
        if std::env::var(HOME_ENV).is_err() {
            let home = dirs::home_dir().expect("home directory should exist");
            let base = get_cabinet_dir().unwrap();
            assert_eq!(base, home.join(".cabinet"));
            assert!(get_config_path().unwrap().starts_with(&base));
            assert!(get_session_path().unwrap().starts_with(&base));
        }
    }

    #[test]
    fn test_path_extensions() {
        let config_path = get_config_path().unwrap();
        assert_eq!(
            config_path.extension().and_then(|e| e.to_str()),
            Some("toml")
        );

        let session_path = get_session_path().unwrap();
        assert_eq!(
            session_path.extension().and_then(|e| e.to_str()),
            Some("json")
        );
    }
}
