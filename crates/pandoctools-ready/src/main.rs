//! pandoctools-ready - post-install hook for pandoctools.
//!
//! Creates shortcuts and the user data directory, merges `Defaults.ini`, and
//! then runs the packaging command given after `--`, if any.

use anyhow::Result;
use clap::Parser;
use pandoctools_ready::config::{AppConfig, BrowserConfig};
use pandoctools_ready::{
    CommandPackageInstall, InstallOptions, InstallPaths, InstallReport, Installer,
    PackageInstall, SkipPackageInstall, StepStatus,
};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "pandoctools-ready")]
#[command(about = "Shortcuts and user data creation for pandoctools")]
struct Args {
    /// Executable name or path the shortcuts launch
    #[arg(long, default_value = AppConfig::EXECUTABLE_NAME)]
    executable: String,

    /// Installed pandoctools package directory (defaults to asking Python)
    #[arg(long)]
    package_dir: Option<PathBuf>,

    /// User data directory (defaults to ~/.pandoctools or %APPDATA%\pandoctools)
    #[arg(long)]
    user_data: Option<PathBuf>,

    /// Do not create any shortcuts
    #[arg(long)]
    no_shortcuts: bool,

    /// Install the headless browser used for exports
    #[arg(long)]
    install_browser: bool,

    /// Command that installs the headless browser
    #[arg(long, default_value = BrowserConfig::INSTALL_COMMAND)]
    browser_command: String,

    /// Print the install report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Packaging command to run once the hook is done
    #[arg(last = true)]
    install_command: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let paths = InstallPaths::detect(args.user_data.as_deref())?;
    let options = InstallOptions {
        executable: args.executable.clone(),
        package_dir: args.package_dir.clone(),
        skip_shortcuts: args.no_shortcuts,
        install_browser: args.install_browser,
        browser_command: args.browser_command.clone(),
    };

    let package_install: Box<dyn PackageInstall> =
        match CommandPackageInstall::from_argv(&args.install_command) {
            Some(step) => Box::new(step),
            None => Box::new(SkipPackageInstall),
        };

    let report = Installer::new(paths, options).run(package_install.as_ref());

    if args.json {
        // Intentional stdout: machine-readable report
        println!("{}", report.to_json()?);
    } else {
        print_summary(&report);
    }

    if let StepStatus::Failed { ref message } = report.package_install {
        anyhow::bail!("package installation failed: {}", message);
    }

    info!("Post-install finished");
    Ok(())
}

fn print_summary(report: &InstallReport) {
    for shortcut in &report.shortcuts {
        println!("✓ Shortcut {}", shortcut.shortcut_path.display());
    }

    if report.config_written {
        println!("✓ Config {}", report.config_file.display());
    }

    if !report.errors.is_empty() {
        println!(
            "{} step(s) failed, see {}",
            report.errors.len(),
            report
                .error_log
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the log output above".to_string())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["pandoctools-ready"]).unwrap();
        assert_eq!(args.executable, "pandoctools");
        assert_eq!(args.browser_command, "pyppeteer-install");
        assert!(!args.install_browser);
        assert!(args.install_command.is_empty());
    }

    #[test]
    fn test_trailing_install_command() {
        let args = Args::try_parse_from([
            "pandoctools-ready",
            "--install-browser",
            "--",
            "pip",
            "install",
            ".",
        ])
        .unwrap();

        assert!(args.install_browser);
        assert_eq!(args.install_command, ["pip", "install", "."]);
    }

    #[test]
    fn test_paths_override() {
        let args = Args::try_parse_from([
            "pandoctools-ready",
            "--user-data",
            "/tmp/ud",
            "--package-dir",
            "/tmp/pkg",
            "--no-shortcuts",
        ])
        .unwrap();

        assert_eq!(args.user_data, Some(PathBuf::from("/tmp/ud")));
        assert_eq!(args.package_dir, Some(PathBuf::from("/tmp/pkg")));
        assert!(args.no_shortcuts);
    }

    #[test]
    fn test_empty_browser_command_parses() {
        let args = Args::try_parse_from(["pandoctools-ready", "--browser-command", ""]).unwrap();
        assert_eq!(args.browser_command, "");
        assert!(!args.install_browser);
    }
}
