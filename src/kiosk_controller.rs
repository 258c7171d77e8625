use tracing::{debug, error, warn};

use crate::{
    launch_config::RunConfig,
    reload_jitter::{ReloadDelaySource, XorShiftJitter},
    watchdog::{Watchdog, WatchdogTick},
    CursorTarget, PermissionDecision, ShellEffect, SignalDisposition,
};

/// One handler per toolkit or engine signal the shell listens to.
pub(crate) trait KioskEvents {
    /// Window realized, moved or resized.
    fn on_window_changed(&mut self) -> Vec<ShellEffect>;
    fn on_permission_request(&mut self, description: &str) -> PermissionDecision;
    fn on_context_menu(&mut self) -> SignalDisposition;
    fn on_print(&mut self) -> SignalDisposition;
    fn on_script_dialog(&mut self, message: &str) -> SignalDisposition;
    fn on_notification(&mut self, title: &str, body: &str) -> SignalDisposition;
    fn on_load_started(&mut self, uri: &str);
    fn on_load_finished(&mut self, uri: &str);
    fn on_load_failed(&mut self, uri: &str, reason: &str) -> Vec<ShellEffect>;
    fn on_tls_load_failed(&mut self, uri: &str, details: &str);
    fn on_resource_load_started(&mut self, uri: &str);
    fn on_title_changed(&mut self, title: Option<&str>);
    fn on_session_cleared(&mut self, result: Result<(), String>) -> Vec<ShellEffect>;
    fn on_web_process_terminated(&mut self, reason: &str) -> Vec<ShellEffect>;
    /// The fixed 1 Hz poll. `window_active` reports whether the main window has focus.
    fn on_tick(&mut self, window_active: bool) -> Vec<ShellEffect>;
}

#[derive(Debug)]
pub(crate) struct KioskController<D = XorShiftJitter> {
    config: RunConfig,
    watchdog: Watchdog,
    pending_session_uri: Option<String>,
    page_title: Option<String>,
    title_reported: bool,
    reload_delays: D,
}

impl KioskController<XorShiftJitter> {
    pub(crate) fn new(config: RunConfig) -> Self {
        Self::with_delay_source(config, XorShiftJitter::from_clock())
    }
}

impl<D: ReloadDelaySource> KioskController<D> {
    pub(crate) fn with_delay_source(config: RunConfig, reload_delays: D) -> Self {
        let watchdog = Watchdog::new(config.watchdog_timeout);
        Self {
            config,
            watchdog,
            pending_session_uri: None,
            page_title: None,
            title_reported: false,
            reload_delays,
        }
    }

    pub(crate) fn config(&self) -> &RunConfig {
        &self.config
    }

    pub(crate) fn watchdog(&self) -> &Watchdog {
        &self.watchdog
    }

    #[cfg(test)]
    fn is_clearing_session(&self) -> bool {
        self.pending_session_uri.is_some()
    }

    /// Loads `uri`, or wipes all website data first when `reset` is set.
    pub(crate) fn start_session(&mut self, uri: &str, reset: bool) -> Vec<ShellEffect> {
        if !reset {
            return vec![ShellEffect::LoadUri(uri.to_string())];
        }

        if self.pending_session_uri.replace(uri.to_string()).is_some() {
            debug!("session clear already in flight, next load will use {uri}");
            return Vec::new();
        }

        debug!("Starting to clean session");
        self.watchdog.suspend();
        vec![ShellEffect::ClearWebsiteData]
    }

    fn hide_cursor_effects(&self, targets: &[CursorTarget]) -> Vec<ShellEffect> {
        if !self.config.hide_mouse {
            return Vec::new();
        }
        targets.iter().copied().map(ShellEffect::HideCursor).collect()
    }

    fn kiosk_suppression(&self) -> SignalDisposition {
        if self.config.kiosk {
            SignalDisposition::Handled
        } else {
            SignalDisposition::Default
        }
    }
}

impl<D: ReloadDelaySource> KioskEvents for KioskController<D> {
    fn on_window_changed(&mut self) -> Vec<ShellEffect> {
        let mut effects = Vec::new();
        if self.config.kiosk {
            effects.push(ShellEffect::ApplyKioskWindowState);
        }
        effects.extend(self.hide_cursor_effects(&[CursorTarget::Window]));
        effects
    }

    fn on_permission_request(&mut self, description: &str) -> PermissionDecision {
        if !self.config.kiosk {
            return PermissionDecision::Default;
        }

        let decision = if self.config.accept_all {
            PermissionDecision::Allow
        } else {
            PermissionDecision::Deny
        };
        debug!("permission request {description}: {decision:?}");
        decision
    }

    fn on_context_menu(&mut self) -> SignalDisposition {
        self.kiosk_suppression()
    }

    fn on_print(&mut self) -> SignalDisposition {
        self.kiosk_suppression()
    }

    fn on_script_dialog(&mut self, message: &str) -> SignalDisposition {
        let disposition = self.kiosk_suppression();
        if disposition.is_handled() {
            debug!("Page requested to show a dialog: {message}");
        }
        disposition
    }

    fn on_notification(&mut self, title: &str, body: &str) -> SignalDisposition {
        let disposition = self.kiosk_suppression();
        if disposition.is_handled() {
            debug!("Page requested to show a notification: {title} -> {body}");
        }
        disposition
    }

    fn on_load_started(&mut self, uri: &str) {
        debug!("page-load started: {uri}");
    }

    fn on_load_finished(&mut self, uri: &str) {
        debug!("Page load completed: {uri}");
    }

    fn on_load_failed(&mut self, uri: &str, reason: &str) -> Vec<ShellEffect> {
        warn!("Load failed. Reloading {uri} ({reason})");
        let delay = self.reload_delays.next_reload_delay();
        debug!("reload of {uri} scheduled in {} ms", delay.as_millis());
        vec![ShellEffect::ScheduleReload {
            uri: uri.to_string(),
            delay,
        }]
    }

    fn on_tls_load_failed(&mut self, uri: &str, details: &str) {
        warn!("TLS certificate error for {uri}: {details}");
    }

    fn on_resource_load_started(&mut self, uri: &str) {
        debug!(
            "Loading resource: {uri} (watchdog at {}s)",
            self.watchdog.elapsed()
        );
        self.watchdog.note_activity();
    }

    fn on_title_changed(&mut self, title: Option<&str>) {
        self.page_title = title.map(str::to_string);
        self.title_reported = true;
    }

    fn on_session_cleared(&mut self, result: Result<(), String>) -> Vec<ShellEffect> {
        let Some(uri) = self.pending_session_uri.take() else {
            warn!("session clear completed with no pending session, ignoring");
            return Vec::new();
        };

        match result {
            Ok(()) => debug!("Session cleaned"),
            Err(error) => warn!("failed to clear session data, loading anyway: {error}"),
        }
        self.watchdog.resume();
        vec![ShellEffect::LoadUri(uri)]
    }

    fn on_web_process_terminated(&mut self, reason: &str) -> Vec<ShellEffect> {
        error!("web process terminated ({reason}), exiting");
        vec![ShellEffect::Quit]
    }

    fn on_tick(&mut self, window_active: bool) -> Vec<ShellEffect> {
        let mut effects = Vec::new();

        if self.watchdog.tick() == WatchdogTick::Fired {
            warn!("Watchdog timeout");
            let base_uri = self.config.base_uri.clone();
            let reset = self.config.watchdog_reset;
            effects.extend(self.start_session(&base_uri, reset));
        }

        effects.extend(self.hide_cursor_effects(&[CursorTarget::Window, CursorTarget::View]));

        if self.config.kiosk && !window_active {
            debug!("Window not active. Trying to present it.");
            effects.push(ShellEffect::PresentWindow);
        }

        // An untitled page blanks the window title instead of keeping the previous one.
        if self.title_reported {
            let title = self.page_title.clone().unwrap_or_default();
            effects.push(ShellEffect::SetWindowTitle(title));
        }

        effects
    }
}
