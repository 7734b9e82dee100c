use super::*;

use crate::app::adb::parse::UNKNOWN_DESCRIPTION;

fn missing_adb() -> AdbProgram {
    AdbProgram::new("/this/path/should/not/exist/adb")
}

#[test]
fn resolve_trace_id_keeps_caller_value() {
    assert_eq!(resolve_trace_id(Some("trace-1".to_string())), "trace-1");
    let generated = resolve_trace_id(Some("   ".to_string()));
    assert!(Uuid::parse_str(&generated).is_ok());
    assert!(Uuid::parse_str(&resolve_trace_id(None)).is_ok());
}

#[test]
fn key_action_infos_follow_display_order() {
    let infos = key_action_infos();
    assert_eq!(infos.len(), 7);
    assert_eq!(infos[0].id, "play_pause");
    assert_eq!(infos[0].keycode, "KEYCODE_MEDIA_PLAY_PAUSE");
    assert_eq!(infos[6].label, "Rewind");
}

#[test]
fn shell_info_reports_interval_in_millis() {
    let info = shell_info(&missing_adb(), &AppConfig::default());
    assert_eq!(info.refresh_interval_ms, 5000);
    assert_eq!(info.adb_path, "/this/path/should/not/exist/adb");
}

#[test]
fn send_key_event_rejects_unknown_action() {
    let err = send_key_event_inner(&missing_adb(), 30, &StatusClock::new(), "eject", "trace-2")
        .unwrap_err();
    assert_eq!(err.code, "ERR_VALIDATION");
    assert_eq!(err.trace_id, "trace-2");
}

#[test]
fn send_key_event_failure_still_refreshes_status() {
    let result = send_key_event_inner(&missing_adb(), 30, &StatusClock::new(), "volume_up", "trace-3")
        .expect("result");
    assert!(!result.sent);
    assert_eq!(
        result.error.as_deref(),
        Some("Failed to send key event: KEYCODE_VOLUME_UP")
    );
    assert_eq!(result.status.snapshot.description, UNKNOWN_DESCRIPTION);
}

#[test]
fn key_event_status_outranks_poll_started_before_it() {
    let clock = StatusClock::new();
    let adb = missing_adb();
    let in_flight_poll = clock.next();

    let result = send_key_event_inner(&adb, 30, &clock, "next_track", "trace-6").expect("result");
    assert!(result.status.sequence > in_flight_poll);

    let later_poll = refresh_status(&adb, 30, &clock, "trace-7");
    assert!(later_poll.sequence > result.status.sequence);
}

#[test]
fn configure_adb_ip_skips_blank_address() {
    let result = configure_adb_ip_inner(&missing_adb(), "  ", 5555, "trace-4").expect("result");
    assert!(result.is_none());
}

#[test]
fn configure_adb_ip_reports_command_failure() {
    let err = configure_adb_ip_inner(&missing_adb(), "10.0.0.5", 5555, "trace-5").unwrap_err();
    assert_eq!(err.code, "ERR_COMMAND_FAILED");
    assert_eq!(err.error, "Failed to connect to device over Wi-Fi.");
}
