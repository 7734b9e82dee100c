use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use adb_media_remote_lib::app::adb::keyevents::KeyAction;
use adb_media_remote_lib::app::adb::locator::{locate_adb, AdbProgram};
use adb_media_remote_lib::app::config::{load_config, AppConfig};
use adb_media_remote_lib::app::models::PlaybackStatus;
use adb_media_remote_lib::app::network::read_ip_config;
use adb_media_remote_lib::app::playback::{build_status, dump_media_session, send_key_event};
use adb_media_remote_lib::app::state::StatusClock;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Args {
    json: bool,
    dump_file: Option<PathBuf>,
    key: Option<KeyAction>,
    with_ip_config: bool,
}

#[derive(Serialize)]
struct SmokeSummary {
    tool: &'static str,
    status: &'static str,
    trace_id: String,
    adb_program: Option<String>,
    playback: Option<PlaybackStatus>,
    checks: Vec<SmokeCheck>,
}

#[derive(Serialize)]
struct SmokeCheck {
    name: &'static str,
    status: &'static str, // pass|fail|warn|skip
    duration_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut json = false;
    let mut dump_file: Option<PathBuf> = None;
    let mut key: Option<KeyAction> = None;
    let mut with_ip_config = false;

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--json" => {
                json = true;
            }
            "--dump-file" => {
                let value = it
                    .next()
                    .ok_or_else(|| "--dump-file requires a value".to_string())?;
                dump_file = Some(PathBuf::from(value));
            }
            "--key" => {
                let value = it
                    .next()
                    .ok_or_else(|| "--key requires a value".to_string())?;
                key = Some(
                    KeyAction::from_id(&value).ok_or_else(|| format!("Unknown key action: {value}"))?,
                );
            }
            "--with-ip-config" => {
                with_ip_config = true;
            }
            "-h" | "--help" => {
                return Err(
                    "Usage: cargo run --bin smoke -- [--json] [--dump-file PATH] [--key ACTION] [--with-ip-config]\n"
                        .to_string(),
                );
            }
            other => return Err(format!("Unknown arg: {other}")),
        }
    }

    Ok(Args {
        json,
        dump_file,
        key,
        with_ip_config,
    })
}

fn run_check<T, F>(checks: &mut Vec<SmokeCheck>, name: &'static str, f: F) -> Option<T>
where
    F: FnOnce() -> Result<T, (String, String)>,
{
    let start = Instant::now();
    match f() {
        Ok(value) => {
            checks.push(SmokeCheck {
                name,
                status: "pass",
                duration_ms: start.elapsed().as_millis(),
                error_code: None,
                error: None,
            });
            Some(value)
        }
        Err((code, err)) => {
            checks.push(SmokeCheck {
                name,
                status: "fail",
                duration_ms: start.elapsed().as_millis(),
                error_code: Some(code),
                error: Some(err),
            });
            None
        }
    }
}

fn skip(checks: &mut Vec<SmokeCheck>, name: &'static str) {
    checks.push(SmokeCheck {
        name,
        status: "skip",
        duration_ms: 0,
        error_code: None,
        error: None,
    });
}

fn main() {
    let args = match parse_args() {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let trace_id = Uuid::new_v4().to_string();
    let mut checks: Vec<SmokeCheck> = Vec::new();

    let config = run_check(&mut checks, "load_config", || {
        load_config(&trace_id).map_err(|err| (err.code, err.error))
    })
    .unwrap_or_else(AppConfig::default);

    let adb: Option<AdbProgram> = if args.dump_file.is_some() && args.key.is_none() {
        skip(&mut checks, "locate_adb");
        None
    } else {
        run_check(&mut checks, "locate_adb", || {
            locate_adb(&config.adb, &trace_id).map_err(|err| (err.code, err.error))
        })
    };

    match (args.key, &adb) {
        (Some(action), Some(adb)) => {
            run_check(&mut checks, "send_key_event", || {
                send_key_event(adb, action, &trace_id).map_err(|err| (err.code, err.error))
            });
        }
        _ => skip(&mut checks, "send_key_event"),
    }

    let dump = match (&args.dump_file, &adb) {
        (Some(path), _) => run_check(&mut checks, "read_dump_file", || {
            fs::read(path)
                .map(|bytes| String::from_utf8_lossy(&bytes).to_string())
                .map_err(|err| ("ERR_IO".to_string(), format!("Failed to read {}: {err}", path.display())))
        }),
        (None, Some(adb)) => run_check(&mut checks, "dump_media_session", || {
            Ok::<_, (String, String)>(dump_media_session(adb, &trace_id))
        }),
        (None, None) => {
            skip(&mut checks, "dump_media_session");
            None
        }
    };
    let clock = StatusClock::new();
    let playback = dump.map(|text| build_status(&text, config.playback.wrap_width, clock.next()));

    if args.with_ip_config {
        run_check(&mut checks, "ip_config", || {
            read_ip_config(config.playback.max_ip_output_chars, &trace_id)
                .map_err(|err| (err.code, err.error))
        });
    } else {
        skip(&mut checks, "ip_config");
    }

    let status = if checks.iter().any(|check| check.status == "fail") {
        "fail"
    } else {
        "pass"
    };
    let summary = SmokeSummary {
        tool: "adb_media_remote_smoke",
        status,
        trace_id,
        adb_program: adb.as_ref().map(|program| program.to_string()),
        playback,
        checks,
    };

    let output = if args.json {
        serde_json::to_string_pretty(&summary).unwrap_or_else(|_| "{}".to_string())
    } else {
        let mut text = format!(
            "status: {}\ntrace_id: {}\nadb: {}\n",
            summary.status,
            summary.trace_id,
            summary.adb_program.as_deref().unwrap_or("-")
        );
        if let Some(playback) = &summary.playback {
            text.push_str(&playback.display_text);
            text.push('\n');
            if let Some(progress) = &playback.progress {
                text.push_str(progress);
                text.push('\n');
            }
        }
        for check in summary.checks.iter().filter(|check| check.status == "fail") {
            text.push_str(&format!(
                "{}: {}\n",
                check.name,
                check.error.as_deref().unwrap_or("failed")
            ));
        }
        text
    };

    println!("{output}");
    if summary.status != "pass" {
        std::process::exit(1);
    }
}
