use tauri::{AppHandle, State};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tracing::{info, warn};
use uuid::Uuid;

use crate::app::adb::keyevents::KeyAction;
use crate::app::adb::locator::AdbProgram;
use crate::app::config::AppConfig;
use crate::app::error::AppError;
use crate::app::models::{
    CommandResponse, IpConfigReport, KeyActionInfo, KeyEventResult, PlaybackStatus, ShellInfo,
    WifiConnectResult,
};
use crate::app::network::{configure_adb_ip as connect_over_wifi, read_ip_config};
use crate::app::playback::{refresh_status, send_key_event as deliver_key_event};
use crate::app::state::{AppState, StatusClock};

#[cfg(test)]
mod tests;

fn resolve_trace_id(input: Option<String>) -> String {
    input
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn show_message(app: &AppHandle, kind: MessageDialogKind, title: &str, message: impl Into<String>) {
    app.dialog()
        .message(message)
        .title(title)
        .kind(kind)
        .show(|_| {});
}

fn show_error(app: &AppHandle, message: impl Into<String>) {
    show_message(app, MessageDialogKind::Error, "Error", message);
}

pub fn key_action_infos() -> Vec<KeyActionInfo> {
    KeyAction::ALL
        .iter()
        .map(|action| KeyActionInfo {
            id: action.id().to_string(),
            label: action.label().to_string(),
            keycode: action.keycode().to_string(),
        })
        .collect()
}

pub fn shell_info(adb: &AdbProgram, config: &AppConfig) -> ShellInfo {
    ShellInfo {
        adb_path: adb.to_string(),
        refresh_interval_ms: config.playback.refresh_interval_secs.saturating_mul(1000),
        actions: key_action_infos(),
    }
}

/// A failed send is reported in the result, not as `Err`; the status is
/// refreshed either way.
pub fn send_key_event_inner(
    adb: &AdbProgram,
    wrap_width: usize,
    clock: &StatusClock,
    action: &str,
    trace_id: &str,
) -> Result<KeyEventResult, AppError> {
    let action = KeyAction::from_id(action)
        .ok_or_else(|| AppError::validation(format!("Unknown key action: {action}"), trace_id))?;
    let outcome = deliver_key_event(adb, action, trace_id);
    let status = refresh_status(adb, wrap_width, clock, trace_id);
    Ok(KeyEventResult {
        keycode: action.keycode().to_string(),
        sent: outcome.is_ok(),
        error: outcome.err().map(|err| err.error),
        status,
    })
}

/// `Ok(None)` when the prompt came back blank.
pub fn configure_adb_ip_inner(
    adb: &AdbProgram,
    address: &str,
    port: u32,
    trace_id: &str,
) -> Result<Option<WifiConnectResult>, AppError> {
    if address.trim().is_empty() {
        info!(trace_id = %trace_id, "configure_adb_ip skipped: empty address");
        return Ok(None);
    }
    connect_over_wifi(adb, address, port, trace_id).map(Some)
}

#[tauri::command(async)]
pub fn get_shell_info(
    state: State<'_, AppState>,
    trace_id: Option<String>,
) -> Result<CommandResponse<ShellInfo>, AppError> {
    let trace_id = resolve_trace_id(trace_id);
    Ok(CommandResponse {
        trace_id,
        data: shell_info(&state.adb, &state.config),
    })
}

#[tauri::command(async)]
pub fn get_config(
    state: State<'_, AppState>,
    trace_id: Option<String>,
) -> Result<CommandResponse<AppConfig>, AppError> {
    let trace_id = resolve_trace_id(trace_id);
    Ok(CommandResponse {
        trace_id,
        data: state.config.clone(),
    })
}

#[tauri::command(async)]
pub fn list_key_actions(trace_id: Option<String>) -> Result<CommandResponse<Vec<KeyActionInfo>>, AppError> {
    let trace_id = resolve_trace_id(trace_id);
    Ok(CommandResponse {
        trace_id,
        data: key_action_infos(),
    })
}

#[tauri::command(async)]
pub fn send_key_event(
    app: AppHandle,
    action: String,
    state: State<'_, AppState>,
    trace_id: Option<String>,
) -> Result<CommandResponse<KeyEventResult>, AppError> {
    let trace_id = resolve_trace_id(trace_id);
    let result = send_key_event_inner(
        &state.adb,
        state.config.playback.wrap_width,
        &state.status_clock,
        &action,
        &trace_id,
    )?;
    if let Some(message) = &result.error {
        show_error(&app, message.clone());
    }
    Ok(CommandResponse {
        trace_id,
        data: result,
    })
}

#[tauri::command(async)]
pub fn get_playback_status(
    state: State<'_, AppState>,
    trace_id: Option<String>,
) -> Result<CommandResponse<PlaybackStatus>, AppError> {
    let trace_id = resolve_trace_id(trace_id);
    let status = refresh_status(
        &state.adb,
        state.config.playback.wrap_width,
        &state.status_clock,
        &trace_id,
    );
    Ok(CommandResponse {
        trace_id,
        data: status,
    })
}

#[tauri::command(async)]
pub fn show_ip_config(
    app: AppHandle,
    state: State<'_, AppState>,
    trace_id: Option<String>,
) -> Result<CommandResponse<IpConfigReport>, AppError> {
    let trace_id = resolve_trace_id(trace_id);
    info!(trace_id = %trace_id, "show_ip_config");
    match read_ip_config(state.config.playback.max_ip_output_chars, &trace_id) {
        Ok(report) => {
            show_message(
                &app,
                MessageDialogKind::Info,
                "IP Configuration",
                report.output.clone(),
            );
            Ok(CommandResponse {
                trace_id,
                data: report,
            })
        }
        Err(err) => {
            show_error(&app, err.error.clone());
            Err(err)
        }
    }
}

#[tauri::command(async)]
pub fn configure_adb_ip(
    app: AppHandle,
    address: String,
    state: State<'_, AppState>,
    trace_id: Option<String>,
) -> Result<CommandResponse<Option<WifiConnectResult>>, AppError> {
    let trace_id = resolve_trace_id(trace_id);
    match configure_adb_ip_inner(&state.adb, &address, state.config.network.tcpip_port, &trace_id) {
        Ok(result) => {
            if let Some(connected) = &result {
                show_message(
                    &app,
                    MessageDialogKind::Info,
                    "Success",
                    format!("Connected to {} over Wi-Fi!", connected.address),
                );
            }
            Ok(CommandResponse {
                trace_id,
                data: result,
            })
        }
        Err(err) => {
            warn!(trace_id = %trace_id, error = %err.error, "configure_adb_ip failed");
            show_error(&app, err.error.clone());
            Err(err)
        }
    }
}
