use tauri::{webview::PageLoadEvent, Manager, RunEvent, WindowEvent};
use tracing::debug;

use crate::{
    engine_policy::EnginePolicy,
    kiosk_controller::KioskEvents,
    launch_config::{self, LaunchDecision, RunConfig},
    logging, main_window, periodic_tick,
    storage_paths::StorageMode,
    ui_dispatch, ShellState, CONFIG_EXIT_CODE, MAIN_WINDOW_LABEL,
};

fn resolve_run_config() -> RunConfig {
    match launch_config::decide_launch(std::env::args_os()) {
        LaunchDecision::Run(config) => config,
        LaunchDecision::Print(text) => {
            print!("{text}");
            std::process::exit(CONFIG_EXIT_CODE);
        }
        LaunchDecision::Reject(error) => {
            eprintln!("{error}");
            std::process::exit(CONFIG_EXIT_CODE);
        }
    }
}

pub(crate) fn run() {
    let config = resolve_run_config();
    logging::init_logging(config.debug);
    logging::log_effective_config(&config);

    let storage = StorageMode::for_config(&config);
    main_window::prepare_storage_environment(&storage);
    let engine_policy = EnginePolicy::for_config(&config);
    let window_config = config.clone();

    tauri::Builder::default()
        .manage(ShellState::new(config))
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            if let WindowEvent::Resized(_) | WindowEvent::Moved(_) = event {
                ui_dispatch::dispatch_kiosk_event(window.app_handle(), |controller| {
                    controller.on_window_changed()
                });
            }
        })
        .on_page_load(|webview, payload| {
            let uri = payload.url().to_string();
            match payload.event() {
                PageLoadEvent::Started => {
                    ui_dispatch::dispatch_kiosk_event(webview.app_handle(), |controller| {
                        controller.on_load_started(&uri);
                        // Without engine resource signals, navigations are the only heartbeat.
                        #[cfg(not(target_os = "linux"))]
                        controller.on_resource_load_started(&uri);
                        Vec::new()
                    });
                }
                PageLoadEvent::Finished => {
                    ui_dispatch::dispatch_kiosk_event(webview.app_handle(), |controller| {
                        controller.on_load_finished(&uri);
                        Vec::new()
                    });
                }
            }
        })
        .setup(move |app| {
            let app_handle = app.handle().clone();
            let window = main_window::build_main_window(&app_handle, &window_config, &storage)?;

            #[cfg(target_os = "linux")]
            crate::webkit_engine::attach_engine(&window, engine_policy)?;
            #[cfg(not(target_os = "linux"))]
            debug!(
                "engine policy {engine_policy:?} left to platform webview defaults for {}",
                window.label()
            );

            ui_dispatch::dispatch_kiosk_event(&app_handle, |controller| {
                let mut effects = controller.on_window_changed();
                let base_uri = controller.config().base_uri.clone();
                effects.extend(controller.start_session(&base_uri, false));
                effects
            });

            periodic_tick::spawn_periodic_tick(app_handle)?;
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|_app_handle, event| {
            if let RunEvent::Exit = event {
                debug!("kiosk shell exiting");
            }
        });
}
