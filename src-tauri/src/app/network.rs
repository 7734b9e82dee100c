use tracing::{info, warn};

use crate::app::adb::keyevents::{connect_args, tcpip_args};
use crate::app::adb::locator::AdbProgram;
use crate::app::adb::runner::{run_command, OutputMode};
use crate::app::error::AppError;
use crate::app::models::{IpConfigReport, WifiConnectResult};

pub const WIFI_CONNECT_FAILED: &str = "Failed to connect to device over Wi-Fi.";

/// Host commands tried in order until one spawns.
pub fn ip_config_commands() -> Vec<(&'static str, Vec<String>)> {
    if cfg!(windows) {
        vec![("ipconfig", Vec::new())]
    } else {
        vec![
            ("ifconfig", Vec::new()),
            ("ip", vec!["addr".to_string(), "show".to_string()]),
        ]
    }
}

pub fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (text[..byte_index].to_string(), true),
        None => (text.to_string(), false),
    }
}

pub fn read_ip_config(max_chars: usize, trace_id: &str) -> Result<IpConfigReport, AppError> {
    read_ip_config_with(&ip_config_commands(), max_chars, trace_id)
}

pub fn read_ip_config_with(
    candidates: &[(&str, Vec<String>)],
    max_chars: usize,
    trace_id: &str,
) -> Result<IpConfigReport, AppError> {
    let mut last_error = None;
    for (program, args) in candidates {
        match run_command(program, args, OutputMode::StdoutOnly, trace_id) {
            Ok(output) => {
                let (text, truncated) = truncate_chars(output.stdout.trim(), max_chars);
                info!(trace_id = %trace_id, program = %program, truncated, "read ip config");
                return Ok(IpConfigReport {
                    command: std::iter::once(program.to_string())
                        .chain(args.iter().cloned())
                        .collect::<Vec<_>>()
                        .join(" "),
                    output: text,
                    truncated,
                });
            }
            Err(err) => {
                warn!(trace_id = %trace_id, program = %program, error = %err.error, "ip config command failed");
                last_error = Some(err);
            }
        }
    }
    let detail = last_error
        .map(|err| err.error)
        .unwrap_or_else(|| "no ip config command available".to_string());
    Err(AppError::command_failed(
        format!("Failed to get IP config: {detail}"),
        trace_id,
    ))
}

/// `adb tcpip <port>` then `adb connect <address>`; both must exit 0.
/// The address is passed through as typed.
pub fn configure_adb_ip(
    adb: &AdbProgram,
    address: &str,
    port: u32,
    trace_id: &str,
) -> Result<WifiConnectResult, AppError> {
    let address = address.trim();
    info!(trace_id = %trace_id, address = %address, port, "configure_adb_ip");

    for args in [tcpip_args(port), connect_args(address)] {
        let output = run_command(adb.path(), &args, OutputMode::Capture, trace_id)
            .map_err(|err| {
                warn!(trace_id = %trace_id, error = %err.error, "adb spawn failed");
                AppError::command_failed(WIFI_CONNECT_FAILED, trace_id)
            })?;
        if !output.success() {
            warn!(
                trace_id = %trace_id,
                step = %args[0],
                exit_code = ?output.exit_code,
                detail = %output.failure_detail(),
                "adb wifi step failed"
            );
            return Err(AppError::command_failed(WIFI_CONNECT_FAILED, trace_id));
        }
    }

    Ok(WifiConnectResult {
        address: address.to_string(),
        port,
        connected: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), ("hé".to_string(), true));
        assert_eq!(truncate_chars("abc", 3), ("abc".to_string(), false));
        assert_eq!(truncate_chars("", 5), (String::new(), false));
    }

    #[test]
    fn picks_platform_command_first() {
        let (program, args) = &ip_config_commands()[0];
        if cfg!(windows) {
            assert_eq!(*program, "ipconfig");
        } else {
            assert_eq!(*program, "ifconfig");
        }
        assert!(args.is_empty());
    }

    #[test]
    fn falls_through_to_next_candidate() {
        let echo = if cfg!(windows) {
            ("cmd.exe", vec!["/C".to_string(), "echo inet 10.0.0.2".to_string()])
        } else {
            ("sh", vec!["-c".to_string(), "echo '  inet 10.0.0.2  '".to_string()])
        };
        let candidates = vec![("/this/program/should/not/exist", Vec::new()), echo];
        let report = read_ip_config_with(&candidates, 2000, "trace").expect("report");
        assert_eq!(report.output, "inet 10.0.0.2");
        assert!(!report.truncated);
    }

    #[test]
    fn reports_failure_when_nothing_spawns() {
        let candidates = vec![("/this/program/should/not/exist", Vec::new())];
        let err = read_ip_config_with(&candidates, 2000, "trace-ip").unwrap_err();
        assert_eq!(err.code, "ERR_COMMAND_FAILED");
        assert!(err.error.starts_with("Failed to get IP config:"));
    }

    #[test]
    fn wifi_spawn_failure_reports_generic_message() {
        let adb = AdbProgram::new("/this/path/should/not/exist/adb");
        let err = configure_adb_ip(&adb, "192.168.1.20", 5555, "trace").unwrap_err();
        assert_eq!(err.error, WIFI_CONNECT_FAILED);
    }

    #[cfg(unix)]
    #[test]
    fn wifi_runs_tcpip_then_connect() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let log = dir.path().join("calls.log");
        let script = dir.path().join("adb");
        fs::write(
            &script,
            format!("#!/bin/sh\necho \"$@\" >> '{}'\n", log.display()),
        )
        .expect("write fake adb");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");

        let result = configure_adb_ip(&AdbProgram::new(&script), " 192.168.1.20 ", 5555, "trace")
            .expect("connect");
        assert_eq!(result.address, "192.168.1.20");
        assert!(result.connected);
        let calls = fs::read_to_string(&log).expect("log");
        assert_eq!(calls, "tcpip 5555\nconnect 192.168.1.20\n");
    }
}
