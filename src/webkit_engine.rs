//! WebKitGTK access for what Tauri does not surface: engine policy, the
//! view signals the kiosk controller listens to, the view cursor and the
//! website-data clear.

use gtk::{gdk, gio, glib, prelude::*};
use tauri::{AppHandle, Manager, WebviewWindow};
use webkit2gtk::{
    CacheModel as WebKitCacheModel, NotificationExt, PermissionRequestExt, SettingsExt,
    TLSErrorsPolicy as WebKitTlsErrorsPolicy, WebContextExt, WebResourceExt, WebViewExt,
    WebsiteDataManagerExt, WebsiteDataTypes,
};

use crate::{
    engine_policy::{CacheModel, EnginePolicy, TlsErrorsPolicy},
    kiosk_controller::KioskEvents,
    ui_dispatch, PermissionDecision, MAIN_WINDOW_LABEL,
};

pub(crate) fn attach_engine(window: &WebviewWindow, policy: EnginePolicy) -> Result<(), String> {
    let app_handle = window.app_handle().clone();
    window
        .with_webview(move |platform_webview| {
            let view = platform_webview.inner();
            configure_engine(&view, policy);
            connect_view_signals(&view, &app_handle);
        })
        .map_err(|error| format!("Failed to reach the webkit view: {error}"))
}

fn configure_engine(view: &webkit2gtk::WebView, policy: EnginePolicy) {
    if let Some(context) = view.context() {
        context.set_cache_model(match policy.cache_model {
            CacheModel::DocumentViewer => WebKitCacheModel::DocumentViewer,
            CacheModel::WebBrowser => WebKitCacheModel::WebBrowser,
        });
    }

    if let Some(manager) = view.website_data_manager() {
        manager.set_tls_errors_policy(match policy.tls_errors {
            TlsErrorsPolicy::Ignore => WebKitTlsErrorsPolicy::Ignore,
            TlsErrorsPolicy::Fail => WebKitTlsErrorsPolicy::Fail,
        });
    }

    if let Some(settings) = WebViewExt::settings(view) {
        #[allow(deprecated)]
        {
            settings.set_enable_java(policy.enable_java);
            settings.set_enable_plugins(policy.enable_plugins);
        }
    }
}

fn connect_view_signals(view: &webkit2gtk::WebView, app_handle: &AppHandle) {
    let app = app_handle.clone();
    view.connect_resource_load_started(move |_, resource, _| {
        let uri = resource.uri().map(|uri| uri.to_string()).unwrap_or_default();
        ui_dispatch::dispatch_kiosk_event(&app, |controller| {
            controller.on_resource_load_started(&uri);
            Vec::new()
        });
    });

    let app = app_handle.clone();
    view.connect_load_failed(move |_, _, failing_uri, error| {
        let reason = error.to_string();
        ui_dispatch::dispatch_kiosk_event(&app, |controller| {
            controller.on_load_failed(failing_uri, &reason)
        });
        true
    });

    let app = app_handle.clone();
    view.connect_load_failed_with_tls_errors(move |_, failing_uri, _, errors| {
        let details = format!("{errors:?}");
        ui_dispatch::dispatch_kiosk_event(&app, |controller| {
            controller.on_tls_load_failed(failing_uri, &details);
            Vec::new()
        });
        false
    });

    let app = app_handle.clone();
    view.connect_permission_request(move |_, request| {
        let description = request.type_().name().to_string();
        let decision = ui_dispatch::query_kiosk_controller(&app, |controller| {
            controller.on_permission_request(&description)
        })
        .unwrap_or(PermissionDecision::Default);

        match decision {
            PermissionDecision::Allow => {
                request.allow();
                true
            }
            PermissionDecision::Deny => {
                request.deny();
                true
            }
            PermissionDecision::Default => false,
        }
    });

    let app = app_handle.clone();
    view.connect_context_menu(move |_, _, _, _| {
        ui_dispatch::query_kiosk_controller(&app, |controller| controller.on_context_menu())
            .is_some_and(|disposition| disposition.is_handled())
    });

    let app = app_handle.clone();
    view.connect_print(move |_, _| {
        ui_dispatch::query_kiosk_controller(&app, |controller| controller.on_print())
            .is_some_and(|disposition| disposition.is_handled())
    });

    let app = app_handle.clone();
    view.connect_script_dialog(move |_, dialog| {
        let mut dialog = dialog.clone();
        let message = dialog
            .message()
            .map(|message| message.to_string())
            .unwrap_or_default();
        ui_dispatch::query_kiosk_controller(&app, |controller| {
            controller.on_script_dialog(&message)
        })
        .is_some_and(|disposition| disposition.is_handled())
    });

    let app = app_handle.clone();
    view.connect_show_notification(move |_, notification| {
        let title = notification.title().map(|title| title.to_string()).unwrap_or_default();
        let body = notification.body().map(|body| body.to_string()).unwrap_or_default();
        ui_dispatch::query_kiosk_controller(&app, |controller| {
            controller.on_notification(&title, &body)
        })
        .is_some_and(|disposition| disposition.is_handled())
    });

    let app = app_handle.clone();
    view.connect_title_notify(move |view| {
        let title = view.title();
        ui_dispatch::dispatch_kiosk_event(&app, |controller| {
            controller.on_title_changed(title.as_deref());
            Vec::new()
        });
    });

    let app = app_handle.clone();
    view.connect_web_process_terminated(move |_, reason| {
        let reason = format!("{reason:?}");
        ui_dispatch::dispatch_kiosk_event(&app, |controller| {
            controller.on_web_process_terminated(&reason)
        });
    });
}

pub(crate) fn apply_gtk_kiosk_hints<F>(window: &WebviewWindow, log: &F)
where
    F: Fn(&str),
{
    match window.gtk_window() {
        Ok(gtk_window) => {
            gtk_window.set_modal(true);
            gtk_window.set_accept_focus(true);
            gtk_window.set_focus_on_map(true);
            gtk_window.set_deletable(false);
            gtk_window.stick();
        }
        Err(error) => log(&format!("failed to reach gtk window for kiosk hints: {error}")),
    }
}

pub(crate) fn present_gtk_window<F>(window: &WebviewWindow, log: &F)
where
    F: Fn(&str),
{
    match window.gtk_window() {
        Ok(gtk_window) => gtk_window.present(),
        Err(error) => log(&format!("failed to reach gtk window to present it: {error}")),
    }
}

pub(crate) fn hide_view_cursor(window: &WebviewWindow) -> Result<(), String> {
    window
        .with_webview(|platform_webview| {
            let view = platform_webview.inner();
            let Some(surface) = view.window() else {
                return;
            };
            let cursor = gdk::Cursor::from_name(&surface.display(), "none");
            surface.set_cursor(cursor.as_ref());
        })
        .map_err(|error| format!("failed to hide view cursor: {error}"))
}

/// Wipes every website data class; completion goes back to the controller.
pub(crate) fn clear_website_data<F>(app_handle: &AppHandle, log: &F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("main window not found, skipping website data clear");
        ui_dispatch::report_session_cleared(app_handle, Err("main window not found".to_string()));
        return;
    };

    let app = app_handle.clone();
    let dispatched = window.with_webview(move |platform_webview| {
        let Some(manager) = platform_webview.inner().website_data_manager() else {
            ui_dispatch::report_session_cleared(
                &app,
                Err("website data manager unavailable".to_string()),
            );
            return;
        };

        let completion_app = app.clone();
        manager.clear(
            WebsiteDataTypes::ALL,
            glib::TimeSpan(0),
            None::<&gio::Cancellable>,
            move |result| {
                ui_dispatch::report_session_cleared(
                    &completion_app,
                    result.map_err(|error| error.to_string()),
                );
            },
        );
    });

    if let Err(error) = dispatched {
        let message = format!("failed to reach the webkit view: {error}");
        log(&message);
        ui_dispatch::report_session_cleared(app_handle, Err(message));
    }
}
