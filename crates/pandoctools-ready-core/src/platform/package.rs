//! Locating the installed `pandoctools` package.
//!
//! The core shell/batch scripts ship inside the Python package, so its
//! directory is found the same way Python would find it: by importing it.

use crate::config::{AppConfig, PathsConfig};
use crate::error::{ReadyError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Resolve the package directory.
///
/// Order: the explicit path, then `PANDOCTOOLS_PACKAGE_DIR`, then the
/// first Python interpreter on `PATH` that can import the package.
pub fn find_package_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return existing_dir(dir);
    }

    if let Some(dir) = std::env::var_os(AppConfig::PACKAGE_DIR_ENV) {
        return existing_dir(Path::new(&dir));
    }

    let mut last_err = None;
    for candidate in PathsConfig::PYTHON_CANDIDATES {
        let python = match which::which(candidate) {
            Ok(path) => path,
            Err(_) => continue,
        };
        match query_python(&python) {
            Ok(dir) => return existing_dir(&dir),
            Err(e) => last_err = Some(e),
        }
    }

    Err(last_err.unwrap_or_else(|| ReadyError::Config {
        message: format!(
            "Could not locate the {} package: no Python interpreter on PATH",
            AppConfig::PACKAGE_NAME
        ),
    }))
}

/// Ask `python` where the package lives.
fn query_python(python: &Path) -> Result<PathBuf> {
    let script = format!(
        "import os, {0}; print(os.path.dirname(os.path.abspath({0}.__file__)))",
        AppConfig::PACKAGE_NAME
    );

    let output = Command::new(python)
        .arg("-c")
        .arg(&script)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ReadyError::Command {
            program: python.display().to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(ReadyError::Command {
            program: python.display().to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let dir = parse_query_output(&String::from_utf8_lossy(&output.stdout)).ok_or_else(|| {
        ReadyError::Command {
            program: python.display().to_string(),
            message: "printed no package directory".to_string(),
        }
    })?;
    debug!("{} reports package dir {}", python.display(), dir.display());
    Ok(dir)
}

/// Last non-empty stdout line; imports may print banners before it.
fn parse_query_output(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(PathBuf::from)
}

fn existing_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_dir() {
        Ok(dir.to_path_buf())
    } else {
        Err(ReadyError::Config {
            message: format!("Package directory does not exist: {}", dir.display()),
        })
    }
}
