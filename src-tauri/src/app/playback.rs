use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

use crate::app::adb::keyevents::{dump_media_session_args, keyevent_args, KeyAction};
use crate::app::adb::locator::AdbProgram;
use crate::app::adb::parse::{format_progress, parse_media_session, sanitize_text};
use crate::app::adb::runner::{run_command, OutputMode};
use crate::app::error::AppError;
use crate::app::models::PlaybackStatus;
use crate::app::state::StatusClock;
use crate::app::text::wrap_text;

pub const STATUS_PREFIX: &str = "Playing:";

pub fn send_key_event(adb: &AdbProgram, action: KeyAction, trace_id: &str) -> Result<(), AppError> {
    let keycode = action.keycode();
    info!(trace_id = %trace_id, keycode = %keycode, "send_key_event");
    let failed = || AppError::command_failed(format!("Failed to send key event: {keycode}"), trace_id);

    let output = run_command(adb.path(), &keyevent_args(keycode), OutputMode::Capture, trace_id)
        .map_err(|err| {
            warn!(trace_id = %trace_id, error = %err.error, "key event spawn failed");
            failed()
        })?;
    if !output.success() {
        warn!(
            trace_id = %trace_id,
            exit_code = ?output.exit_code,
            detail = %output.failure_detail(),
            "key event rejected"
        );
        return Err(failed());
    }
    Ok(())
}

/// Spawn failures degrade to empty text so the parser falls back.
pub fn dump_media_session(adb: &AdbProgram, trace_id: &str) -> String {
    match run_command(
        adb.path(),
        &dump_media_session_args(),
        OutputMode::StdoutOnly,
        trace_id,
    ) {
        Ok(output) => output.stdout,
        Err(err) => {
            warn!(trace_id = %trace_id, error = %err.error, "dumpsys media_session failed");
            String::new()
        }
    }
}

pub fn build_status(output: &str, wrap_width: usize, sequence: u64) -> PlaybackStatus {
    let snapshot = parse_media_session(output);
    let wrapped = wrap_text(&sanitize_text(&snapshot.description), wrap_width).join("\n");
    let progress = format_progress(&snapshot);
    PlaybackStatus {
        display_text: format!("{STATUS_PREFIX}\n{wrapped}"),
        progress,
        snapshot,
        sequence,
        refreshed_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

/// The sequence is taken before adb runs, so it orders refreshes by start time.
pub fn refresh_status(
    adb: &AdbProgram,
    wrap_width: usize,
    clock: &StatusClock,
    trace_id: &str,
) -> PlaybackStatus {
    let sequence = clock.next();
    let output = dump_media_session(adb, trace_id);
    build_status(&output, wrap_width, sequence)
}
