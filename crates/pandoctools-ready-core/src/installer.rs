//! The post-install hook.
//!
//! [`Installer::run`] performs every install step in order. Each step is
//! best-effort: a failure is recorded in the [`ErrorLog`] and the next step
//! still runs. Only the final package-install step decides the outcome the
//! caller reports.

use crate::browser::BrowserInstaller;
use crate::config::{AppConfig, BrowserConfig, IniConfig, ShortcutConfig};
use crate::error::{ReadyError, Result};
use crate::error_log::ErrorLog;
use crate::platform::{self, CoreDirs, Platform};
use crate::settings::ConfigRecord;
use crate::shortcut::{ShortcutCreator, ShortcutOutcome};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// User-selectable behavior of the hook.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Executable name or path the shortcuts launch.
    pub executable: String,
    /// Installed `pandoctools` package directory; discovered when `None`.
    pub package_dir: Option<PathBuf>,
    /// Skip every shortcut step.
    pub skip_shortcuts: bool,
    /// Run the browser installer after the config is written.
    pub install_browser: bool,
    /// Command line of the browser installer; only parsed when it runs.
    pub browser_command: String,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            executable: AppConfig::EXECUTABLE_NAME.to_string(),
            package_dir: None,
            skip_shortcuts: false,
            install_browser: false,
            browser_command: BrowserConfig::INSTALL_COMMAND.to_string(),
        }
    }
}

/// Directories the hook writes to.
#[derive(Debug, Clone)]
pub struct InstallPaths {
    pub platform: Platform,
    /// Per-user pandoctools directory holding `Defaults.ini`.
    pub user_data_dir: PathBuf,
    /// Desktop directory; `None` skips desktop shortcuts.
    pub desktop_dir: Option<PathBuf>,
    /// Applications menu directory; `None` skips menu shortcuts.
    pub menu_dir: Option<PathBuf>,
    /// Where the error log goes; `None` disables it.
    pub error_log_file: Option<PathBuf>,
}

impl InstallPaths {
    /// Detect the platform defaults, overriding the user data directory if given.
    ///
    /// Only a missing user data directory is an error. Unknown desktop or
    /// menu directories are left unset and surface as shortcut failures.
    pub fn detect(user_data_dir: Option<&Path>) -> Result<Self> {
        let user_data_dir = match user_data_dir {
            Some(dir) => dir.to_path_buf(),
            None => platform::user_data_dir()?,
        };

        let error_log_file = match platform::paths::error_log_dir() {
            Ok(dir) => Some(dir.join(AppConfig::ERROR_LOG_FILENAME)),
            Err(e) => {
                warn!("Error log disabled: {}", e);
                None
            }
        };

        Ok(Self {
            platform: Platform::current(),
            user_data_dir,
            desktop_dir: optional_dir("desktop", platform::desktop_dir()),
            menu_dir: optional_dir("menu", platform::menu_dir()),
            error_log_file,
        })
    }

    /// Location of `Defaults.ini`.
    pub fn config_file(&self) -> PathBuf {
        self.user_data_dir.join(IniConfig::FILENAME)
    }
}

fn optional_dir(kind: &str, dir: Result<PathBuf>) -> Option<PathBuf> {
    match dir {
        Ok(dir) => Some(dir),
        Err(e) => {
            warn!("No {} shortcuts: {}", kind, e);
            None
        }
    }
}

/// The standard installation procedure that runs after the hook.
pub trait PackageInstall {
    /// Human-readable description for logs.
    fn describe(&self) -> String;

    /// Whether the step does nothing.
    fn is_noop(&self) -> bool {
        false
    }

    fn run(&self) -> Result<()>;
}

/// No packaging step; the hook runs on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipPackageInstall;

impl PackageInstall for SkipPackageInstall {
    fn describe(&self) -> String {
        "nothing".to_string()
    }

    fn is_noop(&self) -> bool {
        true
    }

    fn run(&self) -> Result<()> {
        Ok(())
    }
}

/// Packaging step delegated to an external command.
#[derive(Debug, Clone)]
pub struct CommandPackageInstall {
    program: String,
    args: Vec<String>,
}

impl CommandPackageInstall {
    /// Build from `argv`; `None` when it is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl PackageInstall for CommandPackageInstall {
    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn run(&self) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .status()
            .map_err(|e| ReadyError::Command {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ReadyError::Command {
                program: self.program.clone(),
                message: format!("exited with {}", status),
            })
        }
    }
}

/// Outcome of an optional step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Skipped,
    Succeeded,
    Failed { message: String },
}

impl StepStatus {
    fn from_result(result: &Result<()>) -> Self {
        match result {
            Ok(()) => StepStatus::Succeeded,
            Err(e) => StepStatus::Failed {
                message: e.to_string(),
            },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepStatus::Failed { .. })
    }
}

/// What the hook did.
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub platform: Platform,
    /// Resolved executable, if it could be found.
    pub executable: Option<PathBuf>,
    pub user_data_dir: PathBuf,
    pub config_file: PathBuf,
    pub config_written: bool,
    pub shortcuts: Vec<ShortcutOutcome>,
    pub error_log: Option<PathBuf>,
    pub browser: StepStatus,
    pub package_install: StepStatus,
    /// Every recorded step failure, rendered.
    pub errors: Vec<String>,
}

impl InstallReport {
    /// The install succeeds unless the packaging step itself failed.
    pub fn is_success(&self) -> bool {
        !self.package_install.is_failed()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs the install steps.
pub struct Installer {
    paths: InstallPaths,
    options: InstallOptions,
    shortcuts: ShortcutCreator,
    log: ErrorLog,
    created: Vec<ShortcutOutcome>,
}

impl Installer {
    pub fn new(paths: InstallPaths, options: InstallOptions) -> Self {
        let shortcuts = ShortcutCreator::new(paths.desktop_dir.clone(), paths.menu_dir.clone());
        Self {
            paths,
            options,
            shortcuts,
            log: ErrorLog::new(),
            created: Vec::new(),
        }
    }

    /// Perform every step, then hand over to `package_install`.
    pub fn run(mut self, package_install: &dyn PackageInstall) -> InstallReport {
        info!(
            "Running {} post-install on {}",
            AppConfig::APP_NAME,
            self.paths.platform
        );

        let core_dirs = self.locate_core_dirs();
        let executable = self.executable_shortcuts();
        self.create_user_data_dir();
        self.folder_shortcuts(core_dirs.as_ref());
        let config_written = self.write_config(executable.as_deref());
        self.flush_log();

        let browser = if self.options.install_browser {
            let result = BrowserInstaller::from_command_line(&self.options.browser_command)
                .and_then(|browser| browser.run());
            if let Err(ref e) = result {
                self.log.record("headless browser installation", e);
            }
            StepStatus::from_result(&result)
        } else {
            StepStatus::Skipped
        };

        let package_install = if package_install.is_noop() {
            StepStatus::Skipped
        } else {
            info!("Running package install: {}", package_install.describe());
            let result = package_install.run();
            if let Err(ref e) = result {
                self.log.record("package installation", e);
            }
            StepStatus::from_result(&result)
        };

        self.append_log();

        InstallReport {
            platform: self.paths.platform,
            executable,
            user_data_dir: self.paths.user_data_dir.clone(),
            config_file: self.paths.config_file(),
            config_written,
            shortcuts: self.created,
            error_log: self.paths.error_log_file.clone(),
            browser,
            package_install,
            errors: self.log.entries().iter().map(|e| e.message.clone()).collect(),
        }
    }

    fn locate_core_dirs(&mut self) -> Option<CoreDirs> {
        match platform::find_package_dir(self.options.package_dir.as_deref()) {
            Ok(dir) => {
                debug!("pandoctools package at {}", dir.display());
                Some(self.paths.platform.core_dirs(&dir))
            }
            Err(e) => {
                self.log.record("locating the pandoctools package", &e);
                None
            }
        }
    }

    /// Desktop and menu shortcuts for the executable; returns its resolved path.
    fn executable_shortcuts(&mut self) -> Option<PathBuf> {
        let executable = match ShortcutCreator::resolve_executable(&self.options.executable) {
            Ok(path) => path,
            Err(e) => {
                self.log.record("resolving the pandoctools executable", &e);
                return None;
            }
        };

        if !self.options.skip_shortcuts {
            let desktop = self.shortcuts.create_desktop_shortcut(&executable, None);
            self.keep("desktop shortcut", desktop);
            let menu = self.shortcuts.create_menu_shortcut(&executable, None);
            self.keep("menu shortcut", menu);
        }

        Some(executable)
    }

    fn create_user_data_dir(&mut self) {
        if let Err(e) = ShortcutCreator::makedirs(&self.paths.user_data_dir) {
            self.log.record("creating the user data directory", &e);
        }
    }

    fn folder_shortcuts(&mut self, core_dirs: Option<&CoreDirs>) {
        if self.options.skip_shortcuts {
            return;
        }

        let user_data = self.paths.user_data_dir.clone();
        let result = self
            .shortcuts
            .create_desktop_shortcut(&user_data, Some(ShortcutConfig::USER_DATA_NAME));
        self.keep("user data shortcut", result);

        for (name, target) in core_dirs.map(CoreDirs::shortcuts).unwrap_or_default() {
            let result = self.shortcuts.create_shortcut(&target, &user_data, Some(name.as_str()));
            self.keep("core data shortcut", result);
        }
    }

    /// Merge and persist `Defaults.ini`; returns whether it was written.
    fn write_config(&mut self, executable: Option<&Path>) -> bool {
        let config_file = self.paths.config_file();

        let existing = match ConfigRecord::load(&config_file) {
            Ok(existing) => existing,
            Err(e) => {
                self.log.record("reading the existing config", &e);
                self.back_up_unreadable(&config_file);
                None
            }
        };

        let executable = executable
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| self.options.executable.clone());
        let record = ConfigRecord::merged(existing.as_ref(), &executable);

        match record.save(&config_file) {
            Ok(()) => {
                info!("Wrote {}", config_file.display());
                true
            }
            Err(e) => {
                let details = format!("File:\n{}\n\n{}", config_file.display(), record.render());
                self.log.record_with_details("creating the ini file", &e, details);
                false
            }
        }
    }

    fn back_up_unreadable(&mut self, config_file: &Path) {
        if !config_file.is_file() {
            return;
        }
        let backup = config_file.with_extension("ini.bak");
        match fs::copy(config_file, &backup) {
            Ok(_) => info!("Backed up unreadable config to {}", backup.display()),
            Err(e) => self.log.record(
                "backing up the unreadable config",
                &ReadyError::io_with_path(e, backup),
            ),
        }
    }

    fn flush_log(&mut self) {
        if let Some(ref path) = self.paths.error_log_file {
            if let Err(e) = self.log.write_to(path) {
                warn!("Failed to write error log: {}", e);
            }
        }
    }

    fn append_log(&mut self) {
        if let Some(ref path) = self.paths.error_log_file {
            if let Err(e) = self.log.append_pending(path) {
                warn!("Failed to append to error log: {}", e);
            }
        }
    }

    fn keep(&mut self, step: &str, result: Result<ShortcutOutcome>) {
        match result {
            Ok(outcome) => self.created.push(outcome),
            Err(e) => self.log.record(step, &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_package_install_from_argv() {
        assert!(CommandPackageInstall::from_argv(&[]).is_none());

        let argv = vec!["pip".to_string(), "install".to_string(), ".".to_string()];
        let step = CommandPackageInstall::from_argv(&argv).unwrap();
        assert_eq!(step.describe(), "pip install .");
        assert!(!step.is_noop());
    }

    #[test]
    fn test_skip_package_install() {
        assert!(SkipPackageInstall.is_noop());
        assert!(SkipPackageInstall.run().is_ok());
    }

    #[test]
    fn test_step_status_serialization() {
        let failed = StepStatus::Failed {
            message: "boom".into(),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["message"], "boom");

        let json = serde_json::to_value(StepStatus::Skipped).unwrap();
        assert_eq!(json["status"], "skipped");
    }

    #[test]
    fn test_default_options() {
        let options = InstallOptions::default();
        assert_eq!(options.executable, "pandoctools");
        assert!(!options.install_browser);
        assert_eq!(options.browser_command, "pyppeteer-install");
        assert!(!options.skip_shortcuts);
    }
}
