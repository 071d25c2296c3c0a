//! Link-style shortcuts: symlinks on Unix, `.lnk` files on Windows.

use crate::error::{ReadyError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Create a link at `link_path` pointing to `target`, replacing a previous link.
pub fn create_link(target: &Path, link_path: &Path) -> Result<()> {
    remove_stale(link_path)?;
    platform_link(target, link_path)?;
    debug!("Linked {} -> {}", link_path.display(), target.display());
    Ok(())
}

/// Remove a previous shortcut at `path`.
///
/// Real directories are left alone; replacing one would destroy user data.
fn remove_stale(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => return Ok(()),
    };

    if metadata.file_type().is_dir() {
        return Err(ReadyError::Shortcut {
            name: path.display().to_string(),
            message: "a directory already exists at this location".to_string(),
        });
    }

    fs::remove_file(path).map_err(|e| ReadyError::io_action("remove old shortcut", path, e))
}

#[cfg(unix)]
fn platform_link(target: &Path, link_path: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link_path)
        .map_err(|e| ReadyError::io_action("create symlink", link_path, e))
}

#[cfg(windows)]
fn platform_link(target: &Path, link_path: &Path) -> Result<()> {
    let link = mslnk::ShellLink::new(target).map_err(|e| lnk_error(link_path, e))?;
    link.create_lnk(link_path).map_err(|e| lnk_error(link_path, e))
}

#[cfg(windows)]
fn lnk_error(link_path: &Path, err: impl std::fmt::Display) -> ReadyError {
    ReadyError::Shortcut {
        name: link_path.display().to_string(),
        message: err.to_string(),
    }
}

#[cfg(not(any(unix, windows)))]
fn platform_link(_target: &Path, link_path: &Path) -> Result<()> {
    Err(ReadyError::Shortcut {
        name: link_path.display().to_string(),
        message: "links are not supported on this platform".to_string(),
    })
}
