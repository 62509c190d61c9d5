//! Tool discovery
//!
//! A configured tool containing a path separator is taken literally. A bare
//! name is looked up in each `PATH` entry in order.

use crate::domain::{Result, RetouchError};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Locate `tool` using the process `PATH`
///
/// # Errors
///
/// Returns [`RetouchError::ToolNotFound`] when no matching executable exists.
pub fn locate_tool(tool: &str) -> Result<PathBuf> {
    let path_var = std::env::var_os("PATH");
    locate_in(tool, path_var.as_deref())
}

/// Locate `tool` against an explicit `PATH` value
pub fn locate_in(tool: &str, path_var: Option<&OsStr>) -> Result<PathBuf> {
    let tool = tool.trim();
    if tool.is_empty() {
        return Err(RetouchError::ToolNotFound(
            "no external tool configured".to_string(),
        ));
    }

    let candidate = Path::new(tool);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        if is_launchable(candidate) {
            return Ok(candidate.to_path_buf());
        }
        return Err(RetouchError::ToolNotFound(format!(
            "{} does not exist or is not executable",
            candidate.display()
        )));
    }

    if let Some(path_var) = path_var {
        for dir in std::env::split_paths(path_var) {
            for name in executable_names(tool) {
                let full = dir.join(&name);
                if is_launchable(&full) {
                    tracing::debug!(tool = %tool, resolved = %full.display(), "Located tool in PATH");
                    return Ok(full);
                }
            }
        }
    }

    Err(RetouchError::ToolNotFound(format!(
        "{tool} was not found in PATH"
    )))
}

#[cfg(windows)]
fn executable_names(tool: &str) -> Vec<String> {
    if Path::new(tool).extension().is_some() {
        vec![tool.to_string()]
    } else {
        vec![format!("{tool}.exe"), tool.to_string()]
    }
}

#[cfg(not(windows))]
fn executable_names(tool: &str) -> Vec<String> {
    vec![tool.to_string()]
}

fn is_launchable(path: &Path) -> bool {
    if super::platform::is_app_bundle(path) {
        return true;
    }
    is_executable_file(path)
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}
