//! Pandoctools Ready - post-install hook for the pandoctools converter.
//!
//! Places desktop and menu shortcuts for the `pandoctools` executable, creates
//! the per-user data directory, merges defaults into `Defaults.ini`, and
//! writes a best-effort error log. Every step is allowed to fail without
//! aborting the install.
//!
//! # Example
//!
//! ```rust,ignore
//! use pandoctools_ready::{InstallOptions, InstallPaths, Installer, SkipPackageInstall};
//!
//! fn main() -> pandoctools_ready::Result<()> {
//!     let paths = InstallPaths::detect(None)?;
//!     let options = InstallOptions::default();
//!     let report = Installer::new(paths, options).run(&SkipPackageInstall);
//!
//!     println!("Config written to {}", report.config_file.display());
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod error_log;
pub mod installer;
pub mod platform;
pub mod settings;
pub mod shortcut;

pub use browser::BrowserInstaller;
pub use error::{ReadyError, Result};
pub use error_log::ErrorLog;
pub use installer::{
    CommandPackageInstall, InstallOptions, InstallPaths, InstallReport, Installer,
    PackageInstall, SkipPackageInstall, StepStatus,
};
pub use platform::{CoreDirs, Platform};
pub use settings::ConfigRecord;
pub use shortcut::{ShortcutCreator, ShortcutKind, ShortcutOutcome};
