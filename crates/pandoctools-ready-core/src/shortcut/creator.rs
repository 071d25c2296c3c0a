//! High-level shortcut creation.
//!
//! Picks the shortcut kind for the platform and target, names the file,
//! and places it in the desktop, menu, or any other directory.

use super::desktop_entry::DesktopEntry;
use super::link::create_link;
use crate::config::ShortcutConfig;
use crate::error::{ReadyError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Kind of shortcut file placed on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutKind {
    /// XDG `.desktop` launcher.
    DesktopEntry,
    /// Symbolic link.
    Symlink,
    /// Windows `.lnk` file.
    WindowsLink,
}

impl ShortcutKind {
    /// Shortcut kind used on this platform for a file or directory target.
    pub fn for_target(target_is_dir: bool) -> Self {
        if cfg!(windows) {
            ShortcutKind::WindowsLink
        } else if cfg!(target_os = "linux") && !target_is_dir {
            ShortcutKind::DesktopEntry
        } else {
            ShortcutKind::Symlink
        }
    }

    /// File extension appended to the shortcut name.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ShortcutKind::DesktopEntry => Some("desktop"),
            ShortcutKind::Symlink => None,
            ShortcutKind::WindowsLink => Some("lnk"),
        }
    }
}

/// A shortcut that was placed on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutOutcome {
    pub name: String,
    pub shortcut_path: PathBuf,
    pub target_path: PathBuf,
    pub kind: ShortcutKind,
}

/// Creates shortcuts in the desktop and menu directories.
///
/// Either directory may be unknown; shortcuts that need it then fail
/// while the others are still created.
pub struct ShortcutCreator {
    /// Desktop directory (~/Desktop).
    desktop_dir: Option<PathBuf>,
    /// Applications menu directory.
    menu_dir: Option<PathBuf>,
}

impl ShortcutCreator {
    pub fn new(desktop_dir: Option<PathBuf>, menu_dir: Option<PathBuf>) -> Self {
        Self {
            desktop_dir,
            menu_dir,
        }
    }

    pub fn desktop_dir(&self) -> Option<&Path> {
        self.desktop_dir.as_deref()
    }

    pub fn menu_dir(&self) -> Option<&Path> {
        self.menu_dir.as_deref()
    }

    /// Resolve an executable: an existing path as-is, otherwise a `PATH` lookup.
    pub fn resolve_executable(name: &str) -> Result<PathBuf> {
        let path = Path::new(name);
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        which::which(name).map_err(|_| ReadyError::ExecutableNotFound {
            name: name.to_string(),
        })
    }

    /// Create directories, tolerating ones that already exist.
    pub fn makedirs(path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| ReadyError::io_action("create directory", path, e))
    }

    /// Place a shortcut to `target` on the desktop.
    pub fn create_desktop_shortcut(
        &self,
        target: &Path,
        name: Option<&str>,
    ) -> Result<ShortcutOutcome> {
        let dir = self.desktop_dir().ok_or_else(|| unknown_dir("desktop"))?;
        self.create_shortcut(target, dir, name)
    }

    /// Place a shortcut to `target` in the applications menu.
    pub fn create_menu_shortcut(&self, target: &Path, name: Option<&str>) -> Result<ShortcutOutcome> {
        let dir = self.menu_dir().ok_or_else(|| unknown_dir("menu"))?;
        self.create_shortcut(target, dir, name)
    }

    /// Place a shortcut to `target` inside `dir`.
    ///
    /// `name` defaults to the target's file stem.
    pub fn create_shortcut(
        &self,
        target: &Path,
        dir: &Path,
        name: Option<&str>,
    ) -> Result<ShortcutOutcome> {
        let name = match name {
            Some(name) => name.to_string(),
            None => default_name(target)?,
        };

        if !target.exists() {
            return Err(ReadyError::Shortcut {
                name,
                message: format!("target does not exist: {}", target.display()),
            });
        }

        let kind = ShortcutKind::for_target(target.is_dir());
        let shortcut_path = match kind.extension() {
            Some(ext) => dir.join(format!("{}.{}", name, ext)),
            None => dir.join(&name),
        };

        Self::makedirs(dir)?;

        match kind {
            ShortcutKind::DesktopEntry => DesktopEntry::builder()
                .name(name.clone())
                .comment(ShortcutConfig::DESKTOP_ENTRY_COMMENT)
                .exec(DesktopEntry::quote_exec(target))
                .icon(ShortcutConfig::DESKTOP_ENTRY_ICON)
                .terminal(true)
                .build()
                .write_to_file(&shortcut_path)?,
            ShortcutKind::Symlink | ShortcutKind::WindowsLink => {
                create_link(target, &shortcut_path)?
            }
        }

        info!(
            "Created shortcut {} -> {}",
            shortcut_path.display(),
            target.display()
        );

        Ok(ShortcutOutcome {
            name,
            shortcut_path,
            target_path: target.to_path_buf(),
            kind,
        })
    }
}

fn unknown_dir(kind: &str) -> ReadyError {
    ReadyError::Config {
        message: format!("Could not determine {} directory", kind),
    }
}

fn default_name(target: &Path) -> Result<String> {
    target
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| ReadyError::Shortcut {
            name: target.display().to_string(),
            message: "cannot derive a shortcut name from the target".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn creator(temp_dir: &TempDir) -> ShortcutCreator {
        ShortcutCreator::new(
            Some(temp_dir.path().join("Desktop")),
            Some(temp_dir.path().join("applications")),
        )
    }

    #[test]
    fn test_default_name_uses_stem() {
        assert_eq!(
            default_name(Path::new("/opt/bin/pandoctools.exe")).unwrap(),
            "pandoctools"
        );
    }

    #[test]
    fn test_missing_target_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = creator(&temp_dir)
            .create_desktop_shortcut(&temp_dir.path().join("missing"), Some("Missing"));
        assert!(matches!(result, Err(ReadyError::Shortcut { .. })));
    }

    #[test]
    fn test_unknown_desktop_dir_fails_only_desktop_shortcuts() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join(".pandoctools");
        fs::create_dir(&target).unwrap();
        let creator = ShortcutCreator::new(None, Some(temp_dir.path().join("applications")));

        let desktop = creator.create_desktop_shortcut(&target, Some("Data"));
        assert!(matches!(desktop, Err(ReadyError::Config { .. })));

        let menu = creator.create_menu_shortcut(&target, Some("Data")).unwrap();
        assert!(menu.shortcut_path.starts_with(temp_dir.path().join("applications")));
    }

    #[test]
    fn test_resolve_executable_missing() {
        let result = ShortcutCreator::resolve_executable("definitely-not-a-real-binary-4821");
        assert!(matches!(result, Err(ReadyError::ExecutableNotFound { .. })));
    }

    #[test]
    fn test_resolve_executable_existing_path() {
        let temp_dir = TempDir::new().unwrap();
        let exe = temp_dir.path().join("pandoctools");
        fs::write(&exe, "").unwrap();

        let resolved = ShortcutCreator::resolve_executable(exe.to_str().unwrap()).unwrap();
        assert_eq!(resolved, exe);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_menu_shortcut_for_file_is_desktop_entry() {
        let temp_dir = TempDir::new().unwrap();
        let exe = temp_dir.path().join("pandoctools");
        fs::write(&exe, "#!/bin/sh\n").unwrap();

        let outcome = creator(&temp_dir).create_menu_shortcut(&exe, None).unwrap();

        assert_eq!(outcome.kind, ShortcutKind::DesktopEntry);
        assert_eq!(
            outcome.shortcut_path,
            temp_dir.path().join("applications").join("pandoctools.desktop")
        );
        let content = fs::read_to_string(&outcome.shortcut_path).unwrap();
        assert!(content.contains(&format!("Exec=\"{}\"", exe.display())));
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_shortcut_is_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let user_data = temp_dir.path().join(".pandoctools");
        fs::create_dir(&user_data).unwrap();

        let outcome = creator(&temp_dir)
            .create_desktop_shortcut(&user_data, Some("Pandoctools User Data"))
            .unwrap();

        assert_eq!(outcome.kind, ShortcutKind::Symlink);
        assert_eq!(
            fs::read_link(temp_dir.path().join("Desktop").join("Pandoctools User Data")).unwrap(),
            user_data
        );
    }
}
