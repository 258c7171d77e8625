use std::thread;

use tauri::AppHandle;
use tracing::warn;

use crate::{kiosk_controller::KioskEvents, ui_dispatch, window_actions, PERIODIC_TICK_INTERVAL};

fn run_tick(app_handle: &AppHandle) {
    let window_active = window_actions::main_window_is_active(app_handle);
    ui_dispatch::dispatch_kiosk_event(app_handle, |controller| controller.on_tick(window_active));
}

/// Drives the 1 Hz poll; every tick is executed on the main thread.
pub(crate) fn spawn_periodic_tick(app_handle: AppHandle) -> Result<(), String> {
    thread::Builder::new()
        .name("kiosk-periodic-tick".to_string())
        .spawn(move || loop {
            thread::sleep(PERIODIC_TICK_INTERVAL);
            if let Err(error) =
                ui_dispatch::run_on_main_thread_dispatch(&app_handle, "periodic tick", run_tick)
            {
                warn!("{error}; stopping periodic tick");
                break;
            }
        })
        .map(|_| ())
        .map_err(|error| format!("Failed to spawn periodic tick thread: {error}"))
}
