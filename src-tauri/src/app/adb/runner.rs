use std::ffi::OsStr;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::app::error::AppError;

/// `StdoutOnly` drops stderr; `Capture` keeps both streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Capture,
    StdoutOnly,
}

#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Trimmed stderr for logs, else the exit code. Never inspected for meaning.
    pub fn failure_detail(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.exit_code {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

#[cfg(windows)]
fn hide_console_window(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    command.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_command: &mut Command) {}

/// Runs to completion with no timeout. Spawn failure is the only `Err`; a
/// non-zero exit comes back as `Ok` with `success() == false`.
pub fn run_command<P, A>(
    program: P,
    args: &[A],
    mode: OutputMode,
    trace_id: &str,
) -> Result<CommandOutput, AppError>
where
    P: AsRef<OsStr>,
    A: AsRef<OsStr>,
{
    let program = program.as_ref();
    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null());
    hide_console_window(&mut command);

    match mode {
        OutputMode::Capture => {
            command.stdout(Stdio::piped()).stderr(Stdio::piped());
        }
        OutputMode::StdoutOnly => {
            command.stdout(Stdio::piped()).stderr(Stdio::null());
        }
    }

    let output = command.output().map_err(|err| {
        AppError::command_failed(
            format!("Failed to spawn {}: {err}", program.to_string_lossy()),
            trace_id,
        )
    })?;

    debug!(
        trace_id = %trace_id,
        program = %program.to_string_lossy(),
        exit_code = ?output.status.code(),
        "command finished"
    );

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code(),
    })
}
