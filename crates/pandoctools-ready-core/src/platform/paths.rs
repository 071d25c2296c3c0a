//! Platform-specific path utilities.
//!
//! This module provides functions to get platform-specific paths for:
//! - The user's home and desktop directories
//! - Application menu/shortcut directories
//! - The pandoctools user data directory

use crate::config::PathsConfig;
use crate::error::{ReadyError, Result};
use std::path::PathBuf;

/// Get the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| ReadyError::Config {
        message: "Could not determine home directory".to_string(),
    })
}

/// Get the user's desktop directory.
///
/// # Platform Behavior
/// Uses the `dirs` crate which handles platform differences:
/// - **Linux**: `~/Desktop` or XDG user dirs
/// - **Windows**: `C:\Users\{user}\Desktop`
/// - **macOS**: `~/Desktop`
pub fn desktop_dir() -> Result<PathBuf> {
    dirs::desktop_dir().ok_or_else(|| ReadyError::Config {
        message: "Could not determine desktop directory".to_string(),
    })
}

/// Get the application menu directory.
///
/// # Platform Behavior
/// - **Linux**: `~/.local/share/applications` (XDG data dir)
/// - **Windows**: `%APPDATA%/Microsoft/Windows/Start Menu/Programs`
/// - **macOS**: `/Applications`
pub fn menu_dir() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let data_dir = dirs::data_dir().ok_or_else(|| ReadyError::Config {
            message: "Could not determine app data directory".to_string(),
        })?;
        Ok(data_dir
            .join("Microsoft")
            .join("Windows")
            .join("Start Menu")
            .join("Programs"))
    }

    #[cfg(target_os = "macos")]
    {
        Ok(PathBuf::from("/Applications"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        Ok(home_dir()?.join(".local").join("share").join("applications"))
    }
}

/// Get the pandoctools user data directory.
///
/// # Platform Behavior
/// - **Windows**: `%APPDATA%\pandoctools`
/// - **Others**: `~/.pandoctools`
pub fn user_data_dir() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let data_dir = dirs::data_dir().ok_or_else(|| ReadyError::Config {
            message: "Could not determine app data directory".to_string(),
        })?;
        Ok(data_dir.join(PathsConfig::USER_DATA_DIR_NAME))
    }

    #[cfg(not(windows))]
    {
        Ok(home_dir()?.join(PathsConfig::USER_DATA_DOT_DIR_NAME))
    }
}

/// Directory receiving the install error log: home, else desktop.
///
/// On Linux and macOS the desktop is resolved from the home directory, so the
/// fallback only takes effect on Windows where both are separate known folders.
pub fn error_log_dir() -> Result<PathBuf> {
    home_dir().or_else(|_| desktop_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_dir() {
        let result = menu_dir();

        #[cfg(target_os = "linux")]
        assert!(result.unwrap().ends_with(".local/share/applications"));

        #[cfg(not(target_os = "linux"))]
        let _ = result;
    }

    #[test]
    fn test_user_data_dir_name() {
        let dir = user_data_dir().unwrap();

        #[cfg(windows)]
        assert!(dir.ends_with("pandoctools"));

        #[cfg(not(windows))]
        assert!(dir.ends_with(".pandoctools"));
    }

    #[test]
    fn test_desktop_dir() {
        // May fail in headless environments, so just check it doesn't panic
        let _ = desktop_dir();
    }

    #[test]
    fn test_error_log_dir_prefers_home() {
        if let Ok(home) = home_dir() {
            assert_eq!(error_log_dir().unwrap(), home);
        }
    }
}
