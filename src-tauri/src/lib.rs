pub mod app;

use tauri::Manager;
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};
use tracing::{error, info, warn};
use uuid::Uuid;

use app::adb::locator::{locate_adb, ADB_NOT_FOUND_TITLE};
use app::commands::{
    configure_adb_ip, get_config, get_playback_status, get_shell_info, list_key_actions,
    send_key_event, show_ip_config,
};
use app::config::{load_config, AppConfig};
use app::logging::init_logging;
use app::state::AppState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let trace_id = Uuid::new_v4().to_string();
    let loaded = load_config(&trace_id);
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&config.logging.log_level);
    if let Err(err) = &loaded {
        warn!(trace_id = %trace_id, error = %err.error, "using default config");
    }

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(move |app| {
            setup_shell(app, config, &trace_id);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            get_shell_info,
            get_config,
            list_key_actions,
            send_key_event,
            get_playback_status,
            show_ip_config,
            configure_adb_ip
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// The window stays hidden until adb is located; otherwise the only thing
/// the user sees is the fatal dialog, after which the process exits with 1.
fn setup_shell(app: &mut tauri::App, config: AppConfig, trace_id: &str) {
    match locate_adb(&config.adb, trace_id) {
        Ok(adb) => {
            info!(trace_id = %trace_id, adb = %adb, "adb located");
            app.manage(AppState::new(adb, config));
            if let Some(window) = app.get_webview_window("main") {
                if let Err(err) = window.show() {
                    warn!(trace_id = %trace_id, error = %err, "failed to show main window");
                }
            }
        }
        Err(err) => {
            error!(trace_id = %trace_id, error = %err.error, "adb not found");
            let handle = app.handle().clone();
            app.dialog()
                .message(err.error)
                .title(ADB_NOT_FOUND_TITLE)
                .kind(MessageDialogKind::Error)
                .show(move |_| handle.exit(1));
        }
    }
}
