use std::{thread, time::Duration};

use tauri::{AppHandle, Manager, WebviewWindow};
use tracing::debug;
use url::Url;

use crate::{
    logging::log_shell_warning, shell_surface::ShellSurface, ui_dispatch, CursorTarget,
    MAIN_WINDOW_LABEL, WEB_PROCESS_EXIT_CODE,
};

fn main_window<F>(app_handle: &AppHandle, action: &str, log: F) -> Option<WebviewWindow>
where
    F: Fn(&str),
{
    let window = app_handle.get_webview_window(MAIN_WINDOW_LABEL);
    if window.is_none() {
        log(&format!("{action} skipped: main window not found"));
    }
    window
}

fn log_on_error<F>(result: tauri::Result<()>, action: &str, log: &F)
where
    F: Fn(&str),
{
    if let Err(error) = result {
        log(&format!("failed to {action}: {error}"));
    }
}

/// Whether the main window holds focus; a missing window counts as active.
pub fn main_window_is_active(app_handle: &AppHandle) -> bool {
    app_handle
        .get_webview_window(MAIN_WINDOW_LABEL)
        .map(|window| window.is_focused().unwrap_or(true))
        .unwrap_or(true)
}

pub fn load_main_window_uri<F>(app_handle: &AppHandle, uri: &str, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window(app_handle, "load uri", &log) else {
        return;
    };

    let parsed = match Url::parse(uri) {
        Ok(parsed) => parsed,
        Err(error) => {
            log(&format!("refusing to load invalid uri '{uri}': {error}"));
            return;
        }
    };
    debug!("loading {parsed}");
    log_on_error(window.navigate(parsed), "navigate main window", &log);
}

pub fn apply_kiosk_window_state<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window(app_handle, "apply kiosk window state", &log) else {
        return;
    };

    if !window.is_fullscreen().unwrap_or(false) {
        log_on_error(window.set_fullscreen(true), "enter fullscreen", &log);
    }
    if window.is_decorated().unwrap_or(true) {
        log_on_error(window.set_decorations(false), "remove decorations", &log);
    }
    log_on_error(window.set_always_on_top(true), "keep window above", &log);
    log_on_error(
        window.set_visible_on_all_workspaces(true),
        "stick window to all workspaces",
        &log,
    );
    log_on_error(window.set_closable(false), "make window non-closable", &log);

    #[cfg(target_os = "linux")]
    crate::webkit_engine::apply_gtk_kiosk_hints(&window, &log);
}

pub fn hide_cursor<F>(app_handle: &AppHandle, target: CursorTarget, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window(app_handle, "hide cursor", &log) else {
        return;
    };

    match target {
        CursorTarget::Window => {
            log_on_error(window.set_cursor_visible(false), "hide window cursor", &log)
        }
        #[cfg(target_os = "linux")]
        CursorTarget::View => {
            if let Err(error) = crate::webkit_engine::hide_view_cursor(&window) {
                log(&error);
            }
        }
        #[cfg(not(target_os = "linux"))]
        CursorTarget::View => {
            log_on_error(window.set_cursor_visible(false), "hide view cursor", &log)
        }
    }
}

pub fn present_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window(app_handle, "present main window", &log) else {
        return;
    };

    #[cfg(target_os = "linux")]
    crate::webkit_engine::present_gtk_window(&window, &log);
    #[cfg(not(target_os = "linux"))]
    log_on_error(window.set_focus(), "focus main window", &log);
}

pub fn set_main_window_title<F>(app_handle: &AppHandle, title: &str, log: F)
where
    F: Fn(&str),
{
    let Some(window) = main_window(app_handle, "set window title", &log) else {
        return;
    };
    log_on_error(window.set_title(title), "set window title", &log);
}

pub fn clear_website_data<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    #[cfg(target_os = "linux")]
    crate::webkit_engine::clear_website_data(app_handle, &log);

    #[cfg(not(target_os = "linux"))]
    {
        let result = match main_window(app_handle, "clear website data", &log) {
            Some(window) => window
                .clear_all_browsing_data()
                .map_err(|error| format!("failed to clear browsing data: {error}")),
            None => Err("main window not found".to_string()),
        };
        // Completion is delivered on a later loop turn, like the engine callback.
        if let Err(error) = ui_dispatch::run_on_main_thread_dispatch(
            app_handle,
            "session clear completion",
            move |main_app| ui_dispatch::report_session_cleared(main_app, result),
        ) {
            log(&error);
        }
    }
}

pub fn schedule_reload<F>(app_handle: &AppHandle, uri: &str, delay: Duration, log: F)
where
    F: Fn(&str),
{
    let reload_app = app_handle.clone();
    let reload_uri = uri.to_string();
    let spawned = thread::Builder::new()
        .name("kiosk-delayed-reload".to_string())
        .spawn(move || {
            thread::sleep(delay);
            if let Err(error) = ui_dispatch::run_on_main_thread_dispatch(
                &reload_app,
                "delayed reload",
                move |main_app| load_main_window_uri(main_app, &reload_uri, log_shell_warning),
            ) {
                log_shell_warning(&error);
            }
        });

    if let Err(error) = spawned {
        log(&format!("failed to schedule reload of {uri}: {error}"));
    }
}

/// Applies controller effects to the Tauri main window.
pub(crate) struct MainWindowSurface {
    app_handle: AppHandle,
}

impl MainWindowSurface {
    pub(crate) fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

impl ShellSurface for MainWindowSurface {
    fn load_uri(&self, uri: &str) {
        load_main_window_uri(&self.app_handle, uri, log_shell_warning);
    }

    fn clear_website_data(&self) {
        clear_website_data(&self.app_handle, log_shell_warning);
    }

    fn schedule_reload(&self, uri: &str, delay: Duration) {
        schedule_reload(&self.app_handle, uri, delay, log_shell_warning);
    }

    fn apply_kiosk_window_state(&self) {
        apply_kiosk_window_state(&self.app_handle, log_shell_warning);
    }

    fn hide_cursor(&self, target: CursorTarget) {
        hide_cursor(&self.app_handle, target, log_shell_warning);
    }

    fn present_window(&self) {
        present_main_window(&self.app_handle, log_shell_warning);
    }

    fn set_window_title(&self, title: &str) {
        set_main_window_title(&self.app_handle, title, log_shell_warning);
    }

    fn quit(&self) {
        self.app_handle.exit(WEB_PROCESS_EXIT_CODE);
    }
}
