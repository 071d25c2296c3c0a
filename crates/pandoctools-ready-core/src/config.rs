//! Centralized constants for the install hook.
//!
//! Names of files, directories and shortcuts, plus the hard-coded values
//! written to `Defaults.ini` when the user has not set them.

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "Pandoctools";
    /// Executable the shortcuts launch.
    pub const EXECUTABLE_NAME: &'static str = "pandoctools";
    /// Python package holding the core shell/batch scripts.
    pub const PACKAGE_NAME: &'static str = "pandoctools";
    pub const PACKAGE_DIR_ENV: &'static str = "PANDOCTOOLS_PACKAGE_DIR";
    pub const ERROR_LOG_FILENAME: &'static str = "pandoctools_install_error_log.txt";
}

/// Paths relative to the user and package directories.
pub struct PathsConfig;

impl PathsConfig {
    /// User data directory name under `%APPDATA%` on Windows.
    pub const USER_DATA_DIR_NAME: &'static str = "pandoctools";
    /// User data directory name under `$HOME` elsewhere.
    pub const USER_DATA_DOT_DIR_NAME: &'static str = ".pandoctools";
    pub const CORE_SH_DIR_NAME: &'static str = "sh";
    pub const CORE_BAT_DIR_NAME: &'static str = "bat";
    /// Interpreters tried, in order, to locate the package directory.
    pub const PYTHON_CANDIDATES: [&'static str; 2] = ["python3", "python"];
}

/// Shortcut names.
pub struct ShortcutConfig;

impl ShortcutConfig {
    pub const USER_DATA_NAME: &'static str = "Pandoctools User Data";
    pub const CORE_DATA_NAME: &'static str = "Pandoctools Core Data";
    /// Appended to the secondary core-data shortcut on Windows.
    pub const BASH_SUFFIX: &'static str = " (Bash)";
    pub const DESKTOP_ENTRY_COMMENT: &'static str = "Convert documents with pandoctools";
    pub const DESKTOP_ENTRY_ICON: &'static str = "text-x-generic";
}

/// Layout and defaults of `Defaults.ini`.
pub struct IniConfig;

impl IniConfig {
    pub const FILENAME: &'static str = "Defaults.ini";
    pub const SECTION: &'static str = "Default";
    /// Key always overwritten with the resolved executable path.
    pub const EXECUTABLE_KEY: &'static str = "pandoctools";
    pub const DEFAULTS: [(&'static str, &'static str); 4] = [
        ("profile", "Default"),
        ("out", "*.*.md"),
        ("root_env", ""),
        ("win_bash", r"%PROGRAMFILES%\Git\bin\bash.exe"),
    ];
}

/// Optional headless-browser dependency.
pub struct BrowserConfig;

impl BrowserConfig {
    pub const INSTALL_COMMAND: &'static str = "pyppeteer-install";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_do_not_contain_executable_key() {
        assert!(IniConfig::DEFAULTS
            .iter()
            .all(|(key, _)| *key != IniConfig::EXECUTABLE_KEY));
    }

    #[test]
    fn test_defaults_order() {
        let keys: Vec<&str> = IniConfig::DEFAULTS.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["profile", "out", "root_env", "win_bash"]);
    }
}
