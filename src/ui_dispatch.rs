use tauri::{AppHandle, Manager};
use tracing::warn;

use crate::{
    kiosk_controller::{KioskController, KioskEvents},
    shell_surface::apply_effects,
    window_actions::MainWindowSurface, ShellEffect, ShellState,
};

pub(crate) fn run_on_main_thread_dispatch<F>(
    app_handle: &AppHandle,
    task_name: &str,
    task: F,
) -> Result<(), String>
where
    F: FnOnce(&AppHandle) + Send + 'static,
{
    let main_app = app_handle.clone();
    app_handle
        .run_on_main_thread(move || task(&main_app))
        .map_err(|error| format!("failed to dispatch {task_name} to main thread: {error}"))
}

/// Runs `handle` against the controller, then applies its effects with the lock released.
pub(crate) fn dispatch_kiosk_event<F>(app_handle: &AppHandle, handle: F)
where
    F: FnOnce(&mut KioskController) -> Vec<ShellEffect>,
{
    let Some(effects) = query_kiosk_controller(app_handle, handle) else {
        return;
    };
    if effects.is_empty() {
        return;
    }
    apply_effects(&MainWindowSurface::new(app_handle.clone()), effects);
}

pub(crate) fn query_kiosk_controller<R, F>(app_handle: &AppHandle, query: F) -> Option<R>
where
    F: FnOnce(&mut KioskController) -> R,
{
    let Some(state) = app_handle.try_state::<ShellState>() else {
        warn!("kiosk event dropped: shell state is not managed");
        return None;
    };
    Some(state.with_controller(query))
}

pub(crate) fn report_session_cleared(app_handle: &AppHandle, result: Result<(), String>) {
    dispatch_kiosk_event(app_handle, |controller| controller.on_session_cleared(result));
}
