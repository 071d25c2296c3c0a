//! Optional installation of the headless browser used for PDF/HTML export.

use crate::error::{ReadyError, Result};
use std::process::{Command, Stdio};
use tracing::info;

/// Runs the external command that downloads the headless browser.
#[derive(Debug, Clone)]
pub struct BrowserInstaller {
    program: String,
    args: Vec<String>,
}

impl BrowserInstaller {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a whitespace-separated command line.
    pub fn from_command_line(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or_else(|| ReadyError::Config {
            message: "browser install command is empty".to_string(),
        })?;
        Ok(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the command, inheriting stdout/stderr so download progress shows.
    pub fn run(&self) -> Result<()> {
        info!("Installing headless browser with `{}`", self.program);

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| ReadyError::Command {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(ReadyError::Command {
                program: self.program.clone(),
                message: format!("exited with {}", status),
            });
        }

        info!("Headless browser installed");
        Ok(())
    }
}
