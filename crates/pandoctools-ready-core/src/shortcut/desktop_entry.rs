//! Desktop entry (.desktop file) generation.
//!
//! Implements the subset of the XDG Desktop Entry Specification needed to
//! launch a command-line executable from a desktop or application menu.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

use crate::error::{ReadyError, Result};
use tracing::debug;

/// A desktop entry representation.
#[derive(Debug, Clone)]
pub struct DesktopEntry {
    /// Entry name (shown in menus).
    pub name: String,
    /// Comment/description.
    pub comment: Option<String>,
    /// Executable command.
    pub exec: String,
    /// Icon name or path.
    pub icon: Option<String>,
    /// Whether to run in a terminal.
    pub terminal: bool,
    /// Categories (semicolon-separated).
    pub categories: Vec<String>,
}

impl Default for DesktopEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            comment: None,
            exec: String::new(),
            icon: None,
            terminal: true,
            categories: vec!["Office".to_string(), "Utility".to_string()],
        }
    }
}

impl DesktopEntry {
    /// Create a new desktop entry builder.
    pub fn builder() -> DesktopEntryBuilder {
        DesktopEntryBuilder::new()
    }

    /// Quote a path for the `Exec` key.
    ///
    /// The quoted argument is escaped first, then the whole value is escaped
    /// again as a desktop-entry string: a literal backslash ends up as four,
    /// and `%` is doubled so it is not read as a field code.
    pub fn quote_exec(path: &Path) -> String {
        let raw = path.display().to_string();
        let argument = raw
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('`', "\\`")
            .replace('$', "\\$");
        let value = argument.replace('\\', "\\\\").replace('%', "%%");
        format!("\"{}\"", value)
    }

    /// Generate the .desktop file content.
    pub fn render(&self) -> String {
        let mut content = String::new();

        let _ = writeln!(content, "[Desktop Entry]");
        let _ = writeln!(content, "Type=Application");
        let _ = writeln!(content, "Name={}", self.name);

        if let Some(ref comment) = self.comment {
            let _ = writeln!(content, "Comment={}", comment);
        }

        let _ = writeln!(content, "Exec={}", self.exec);

        if let Some(ref icon) = self.icon {
            let _ = writeln!(content, "Icon={}", icon);
        }

        let _ = writeln!(content, "Terminal={}", self.terminal);

        if !self.categories.is_empty() {
            let _ = writeln!(content, "Categories={};", self.categories.join(";"));
        }

        content
    }

    /// Write the desktop entry to a file and mark it executable.
    ///
    /// File managers refuse to launch untrusted entries without the
    /// executable bit.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ReadyError::io_action("create directory", parent, e))?;
        }

        fs::write(path, self.render())
            .map_err(|e| ReadyError::io_action("write desktop file", path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut permissions = fs::metadata(path)
                .map_err(|e| ReadyError::io_action("get file metadata", path, e))?
                .permissions();
            permissions.set_mode(0o755);
            fs::set_permissions(path, permissions)
                .map_err(|e| ReadyError::io_action("set permissions", path, e))?;
        }

        debug!("Wrote desktop entry to {:?}", path);

        Ok(())
    }
}

/// Builder for desktop entries.
pub struct DesktopEntryBuilder {
    entry: DesktopEntry,
}

impl DesktopEntryBuilder {
    pub fn new() -> Self {
        Self {
            entry: DesktopEntry::default(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.entry.name = name.into();
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.entry.comment = Some(comment.into());
        self
    }

    pub fn exec(mut self, exec: impl Into<String>) -> Self {
        self.entry.exec = exec.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.entry.icon = Some(icon.into());
        self
    }

    pub fn terminal(mut self, terminal: bool) -> Self {
        self.entry.terminal = terminal;
        self
    }

    pub fn build(self) -> DesktopEntry {
        self.entry
    }
}

impl Default for DesktopEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_entry_builder() {
        let entry = DesktopEntry::builder()
            .name("pandoctools")
            .comment("Convert documents")
            .exec("/usr/bin/pandoctools")
            .icon("text-x-generic")
            .build();

        assert_eq!(entry.name, "pandoctools");
        assert_eq!(entry.comment, Some("Convert documents".to_string()));
        assert_eq!(entry.exec, "/usr/bin/pandoctools");
        assert!(entry.terminal);
    }

    #[test]
    fn test_render() {
        let entry = DesktopEntry::builder()
            .name("pandoctools")
            .exec("\"/opt/conda/bin/pandoctools\"")
            .build();

        let content = entry.render();

        assert!(content.starts_with("[Desktop Entry]\n"));
        assert!(content.contains("Name=pandoctools"));
        assert!(content.contains("Exec=\"/opt/conda/bin/pandoctools\""));
        assert!(content.contains("Terminal=true"));
        assert!(!content.contains("Icon="));
    }

    #[test]
    fn test_quote_exec_escapes_reserved_chars() {
        let quoted = DesktopEntry::quote_exec(Path::new("/home/a b/$x/pandoctools"));
        assert_eq!(quoted, r#""/home/a b/\\$x/pandoctools""#);
    }

    #[test]
    fn test_quote_exec_backslash_and_percent() {
        let quoted = DesktopEntry::quote_exec(Path::new(r"/opt/a\b/100%/pandoctools"));
        assert_eq!(quoted, r#""/opt/a\\\\b/100%%/pandoctools""#);
    }

    #[test]
    fn test_quote_exec_plain_path_unchanged() {
        let quoted = DesktopEntry::quote_exec(Path::new("/usr/bin/pandoctools"));
        assert_eq!(quoted, "\"/usr/bin/pandoctools\"");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_desktop_file() {
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("apps").join("pandoctools.desktop");

        let entry = DesktopEntry::builder()
            .name("pandoctools")
            .exec("/bin/true")
            .build();

        entry.write_to_file(&file_path).unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert!(content.contains("Name=pandoctools"));

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o755, 0o755);
    }
}
