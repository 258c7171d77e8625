#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_runtime;
mod app_types;
mod engine_policy;
mod kiosk_controller;
mod launch_config;
mod logging;
mod main_window;
mod periodic_tick;
mod reload_jitter;
mod shell_surface;
mod storage_paths;
mod ui_dispatch;
mod watchdog;
#[cfg(target_os = "linux")]
mod webkit_engine;
mod window_actions;

pub(crate) use app_constants::*;
pub(crate) use app_types::{
    CursorTarget, PermissionDecision, ShellEffect, ShellState, SignalDisposition,
};

fn main() {
    app_runtime::run();
}
