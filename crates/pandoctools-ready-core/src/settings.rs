//! The `Defaults.ini` configuration record.
//!
//! A flat key/value mapping stored under a single `[Default]` section.
//! Values the user already set are kept; only missing keys get defaults, and
//! the `pandoctools` key always receives the freshly resolved executable.

use crate::config::IniConfig;
use crate::error::{ReadyError, Result};
use ini::{Ini, ParseOption};
use std::fmt::Write as FmtWrite;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;

/// Ordered key/value pairs of the `[Default]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigRecord {
    entries: Vec<(String, String)>,
}

impl ConfigRecord {
    /// Empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record holding only the hard-coded defaults.
    pub fn defaults() -> Self {
        let mut record = Self::new();
        for (key, value) in IniConfig::DEFAULTS {
            record.set(key, value);
        }
        record
    }

    /// Build the record to persist.
    ///
    /// Defaults first, overlaid with every key of `existing`, then the
    /// executable path.
    pub fn merged(existing: Option<&ConfigRecord>, executable: &str) -> Self {
        let mut record = Self::defaults();
        if let Some(existing) = existing {
            record.overlay(existing);
        }
        record.set(IniConfig::EXECUTABLE_KEY, executable);
        record
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a value, keeping the key's position if it already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Copy every entry of `other` into this record.
    pub fn overlay(&mut self, other: &ConfigRecord) {
        for (key, value) in &other.entries {
            self.set(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse INI text, returning `None` when it has no `[Default]` section.
    ///
    /// Values are taken verbatim: quotes and backslashes are not
    /// interpreted. Keys are lower-cased.
    pub fn parse(text: &str, origin: &Path) -> Result<Option<Self>> {
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };

        let ini = Ini::load_from_str_opt(text, options).map_err(|e| ReadyError::IniParse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

        let Some(section) = ini.section(Some(IniConfig::SECTION)) else {
            return Ok(None);
        };

        let mut record = Self::new();
        for (key, value) in section.iter() {
            record.set(key.to_lowercase(), value);
        }
        Ok(Some(record))
    }

    /// Load the record from disk.
    ///
    /// Returns `None` if the file doesn't exist or lacks the section.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(path)
            .map_err(|e| ReadyError::io_action("read config", path, e))?;
        Self::parse(&text, path)
    }

    /// Render as INI text with `key = value` lines.
    pub fn render(&self) -> String {
        let mut content = String::new();
        let _ = writeln!(content, "[{}]", IniConfig::SECTION);
        for (key, value) in &self.entries {
            let _ = writeln!(content, "{} = {}", key, value);
        }
        let _ = writeln!(content);
        content
    }

    /// Write the record to `path`.
    ///
    /// Goes through a temp file and rename so a failed write never leaves
    /// a truncated config behind. A symlinked config is written through to
    /// its target, and a read-only config is left untouched.
    pub fn save(&self, path: &Path) -> Result<()> {
        let path = &writable_target(path)?;
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| ReadyError::io_action("create config directory", parent, e))?;
            }
        }

        let temp_path = path.with_extension(format!("ini.{}.tmp", process::id()));
        fs::write(&temp_path, self.render())
            .map_err(|e| ReadyError::io_action("write temp config", &temp_path, e))?;

        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(ReadyError::io_action("replace config", path, e));
        }

        debug!("Wrote config to {}", path.display());
        Ok(())
    }
}

/// File a save of `path` should replace.
fn writable_target(path: &Path) -> Result<PathBuf> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // A dangling link still names the file to create.
            return Ok(match (fs::read_link(path), path.parent()) {
                (Ok(target), Some(dir)) => dir.join(target),
                (Ok(target), None) => target,
                (Err(_), _) => path.to_path_buf(),
            });
        }
        Err(e) => return Err(ReadyError::io_action("inspect config", path, e)),
    };

    if metadata.is_file() && metadata.permissions().readonly() {
        return Err(ReadyError::io_action(
            "write config",
            path,
            io::Error::new(io::ErrorKind::PermissionDenied, "file is read-only"),
        ));
    }

    fs::canonicalize(path).map_err(|e| ReadyError::io_action("resolve config path", path, e))
}
