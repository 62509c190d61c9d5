//! External editing tool invocation
//!
//! [`ProcessLauncher::launch`] passes every file as an argument. Attached runs
//! wait for the tool to exit and report its exit code; detached runs return
//! as soon as the process has started.

pub mod locator;
pub mod platform;

pub use locator::{locate_in, locate_tool};

use crate::domain::{Result, RetouchError, RunMode};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What happened when the tool was started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// Mode the tool ran in
    pub mode: RunMode,

    /// OS process id, when the platform reports one
    pub pid: Option<u32>,

    /// Exit code of an attached run; always `None` when detached
    pub exit_code: Option<i32>,
}

impl LaunchOutcome {
    /// Whether an attached run exited cleanly
    pub fn exited_cleanly(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Starts the external editing tool
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher {
    fixed_args: Vec<String>,
}

impl ProcessLauncher {
    /// Launcher that passes only the file list
    pub fn new() -> Self {
        Self::default()
    }

    /// Launcher that places `args` before the file list
    pub fn with_args(args: Vec<String>) -> Self {
        Self { fixed_args: args }
    }

    /// Run `tool` on `files`
    ///
    /// # Errors
    ///
    /// Returns [`RetouchError::ToolNotFound`] if the binary disappeared and
    /// [`RetouchError::Launch`] for any other process-creation failure.
    pub async fn launch(
        &self,
        tool: &Path,
        files: &[PathBuf],
        mode: RunMode,
    ) -> Result<LaunchOutcome> {
        let mut command = platform::build_command(tool, &self.fixed_args, files, mode);

        tracing::info!(
            tool = %tool.display(),
            file_count = files.len(),
            mode = %mode,
            "Launching external tool"
        );

        let mut child = command.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => RetouchError::ToolNotFound(format!("{}: {e}", tool.display())),
            _ => RetouchError::Launch(format!("{}: {e}", tool.display())),
        })?;
        let pid = child.id();

        match mode {
            RunMode::Detached => {
                tracing::info!(pid = ?pid, "External tool started detached");
                Ok(LaunchOutcome {
                    mode,
                    pid,
                    exit_code: None,
                })
            }
            RunMode::Attached => {
                let status = child.wait().await.map_err(|e| {
                    RetouchError::Launch(format!("Failed waiting for {}: {e}", tool.display()))
                })?;
                tracing::info!(pid = ?pid, status = %status, "External tool exited");
                Ok(LaunchOutcome {
                    mode,
                    pid,
                    exit_code: status.code(),
                })
            }
        }
    }
}
