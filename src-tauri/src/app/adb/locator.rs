use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::app::config::AdbSettings;
use crate::app::error::AppError;

pub const ADB_NOT_FOUND_TITLE: &str = "ADB Not Found";

/// A located adb binary. Built once at startup and handed to every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdbProgram {
    path: PathBuf,
}

impl AdbProgram {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for AdbProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

pub fn adb_binary_name() -> &'static str {
    if cfg!(windows) {
        "adb.exe"
    } else {
        "adb"
    }
}

pub fn normalize_command_path(value: &str) -> String {
    let trimmed = value.trim();
    if let Some(inner) = trimmed
        .strip_prefix('"')
        .and_then(|candidate| candidate.strip_suffix('"'))
    {
        return inner.trim().to_string();
    }
    if let Some(inner) = trimmed
        .strip_prefix('\'')
        .and_then(|candidate| candidate.strip_suffix('\''))
    {
        return inner.trim().to_string();
    }
    trimmed.to_string()
}

pub fn not_found_message(bundled_dir: &str) -> String {
    format!(
        "ADB is not installed and could not be found in the app folder.\n\n\
         Please install ADB or include it in a '{bundled_dir}' folder next to this app."
    )
}

/// Resolves adb from the live process environment.
pub fn locate_adb(settings: &AdbSettings, trace_id: &str) -> Result<AdbProgram, AppError> {
    locate_adb_in(settings, std::env::var_os("PATH"), &app_dirs(), trace_id)
}

/// Lookup order: configured path, then `PATH`, then `<app dir>/<bundled_dir>/adb`.
pub fn locate_adb_in(
    settings: &AdbSettings,
    path_var: Option<OsString>,
    app_dirs: &[PathBuf],
    trace_id: &str,
) -> Result<AdbProgram, AppError> {
    let configured = normalize_command_path(&settings.command_path);
    if !configured.is_empty() {
        let candidate = PathBuf::from(&configured);
        if is_executable_file(&candidate) {
            info!(trace_id = %trace_id, path = %candidate.display(), "using configured adb");
            return Ok(AdbProgram::new(candidate));
        }
        warn!(
            trace_id = %trace_id,
            path = %configured,
            "configured adb path is not an executable file, falling back to search"
        );
    }

    let name = adb_binary_name();
    if let Some(found) = path_var.and_then(|value| find_on_path(name, &value)) {
        info!(trace_id = %trace_id, path = %found.display(), "found adb on PATH");
        return Ok(AdbProgram::new(found));
    }

    if let Some(found) = find_bundled(app_dirs, &settings.bundled_dir, name) {
        info!(trace_id = %trace_id, path = %found.display(), "found bundled adb");
        return Ok(AdbProgram::new(found));
    }

    Err(AppError::adb_not_found(
        not_found_message(&settings.bundled_dir),
        trace_id,
    ))
}

pub fn find_on_path(name: &str, path_var: &OsString) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable_file(candidate))
}

pub fn find_bundled(app_dirs: &[PathBuf], bundled_dir: &str, name: &str) -> Option<PathBuf> {
    app_dirs
        .iter()
        .map(|dir| dir.join(bundled_dir).join(name))
        .find(|candidate| is_executable_file(candidate))
}

fn app_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        if !dirs.contains(&exe_dir) {
            dirs.push(exe_dir);
        }
    }
    dirs
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}
