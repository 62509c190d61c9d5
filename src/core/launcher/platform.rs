//! Platform launch incantations
//!
//! Builds the concrete command for a tool invocation. Detached processes get
//! their own process group (unix) or console (windows) so they outlive us;
//! macOS application bundles go through `open`.

use crate::domain::RunMode;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;
#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

/// Whether `path` is a macOS application bundle
pub fn is_app_bundle(path: &Path) -> bool {
    cfg!(target_os = "macos")
        && path.is_dir()
        && path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("app"))
            .unwrap_or(false)
}

/// Build the command that runs `tool` on `files`
pub fn build_command(tool: &Path, args: &[String], files: &[PathBuf], mode: RunMode) -> Command {
    let mut command = if is_app_bundle(tool) {
        let mut open = Command::new("open");
        if mode == RunMode::Attached {
            open.arg("-W");
        }
        open.arg("-a").arg(tool);
        open.args(files);
        if !args.is_empty() {
            open.arg("--args").args(args);
        }
        open
    } else {
        let mut direct = Command::new(tool);
        direct.args(args).args(files);
        direct
    };

    match mode {
        RunMode::Attached => {
            command
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        }
        RunMode::Detached => {
            command
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
            detach(&mut command);
        }
    }

    command
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    command.process_group(0);
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_command: &mut Command) {}
