//! Platform abstraction layer.
//!
//! All `#[cfg]` blocks for OS-specific behavior live here:
//! - `paths` - well-known user directories (desktop, menu, home, user data)
//! - `package` - locating the installed `pandoctools` package
//!
//! The hook distinguishes Windows from everything else, matching how the
//! pandoctools core scripts are shipped (`bat` vs `sh`).

pub mod package;
pub mod paths;

use crate::config::{PathsConfig, ShortcutConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub use package::find_package_dir;
pub use paths::{desktop_dir, home_dir, menu_dir, user_data_dir};

/// Platform family relevant to the install layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Posix,
}

impl Platform {
    /// Platform the binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Posix => "posix",
        }
    }

    /// Select the core-data directories inside the package directory.
    pub fn core_dirs(&self, package_dir: &Path) -> CoreDirs {
        let sh = package_dir.join(PathsConfig::CORE_SH_DIR_NAME);
        match self {
            Platform::Windows => CoreDirs {
                primary: package_dir.join(PathsConfig::CORE_BAT_DIR_NAME),
                secondary: Some(sh),
            },
            Platform::Posix => CoreDirs {
                primary: sh,
                secondary: None,
            },
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Core-data directories that get shortcuts in the user-data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreDirs {
    /// Native scripts (`bat` on Windows, `sh` elsewhere).
    pub primary: PathBuf,
    /// Bash scripts on Windows; `None` where they are already the primary.
    pub secondary: Option<PathBuf>,
}

impl CoreDirs {
    /// Shortcut names paired with their targets.
    pub fn shortcuts(&self) -> Vec<(String, PathBuf)> {
        let mut shortcuts = vec![(
            ShortcutConfig::CORE_DATA_NAME.to_string(),
            self.primary.clone(),
        )];
        if let Some(ref secondary) = self.secondary {
            shortcuts.push((
                format!(
                    "{}{}",
                    ShortcutConfig::CORE_DATA_NAME,
                    ShortcutConfig::BASH_SUFFIX
                ),
                secondary.clone(),
            ));
        }
        shortcuts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_platform() {
        #[cfg(windows)]
        assert_eq!(Platform::current(), Platform::Windows);

        #[cfg(unix)]
        assert_eq!(Platform::current(), Platform::Posix);
    }

    #[test]
    fn test_posix_core_dirs() {
        let dirs = Platform::Posix.core_dirs(Path::new("/pkg"));
        assert_eq!(dirs.primary, Path::new("/pkg").join("sh"));
        assert!(dirs.secondary.is_none());

        let shortcuts = dirs.shortcuts();
        assert_eq!(shortcuts.len(), 1);
        assert_eq!(shortcuts[0].0, "Pandoctools Core Data");
    }

    #[test]
    fn test_windows_core_dirs() {
        let dirs = Platform::Windows.core_dirs(Path::new("/pkg"));
        assert_eq!(dirs.primary, Path::new("/pkg").join("bat"));
        assert_eq!(dirs.secondary, Some(Path::new("/pkg").join("sh")));

        let names: Vec<String> = dirs.shortcuts().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            ["Pandoctools Core Data", "Pandoctools Core Data (Bash)"]
        );
    }
}
