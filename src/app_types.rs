use std::{sync::Mutex, time::Duration};

use crate::{kiosk_controller::KioskController, launch_config::RunConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CursorTarget {
    Window,
    View,
}

/// Whether a signal was consumed or left to the engine's default handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignalDisposition {
    Handled,
    Default,
}

impl SignalDisposition {
    pub(crate) fn is_handled(self) -> bool {
        self == Self::Handled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PermissionDecision {
    Allow,
    Deny,
    Default,
}

/// Work the controller hands back to the shell, applied outside the controller lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellEffect {
    LoadUri(String),
    ClearWebsiteData,
    ScheduleReload { uri: String, delay: Duration },
    ApplyKioskWindowState,
    HideCursor(CursorTarget),
    PresentWindow,
    SetWindowTitle(String),
    Quit,
}

#[derive(Debug)]
pub(crate) struct ShellState {
    pub(crate) config: RunConfig,
    pub(crate) controller: Mutex<KioskController>,
}

impl ShellState {
    pub(crate) fn new(config: RunConfig) -> Self {
        let controller = KioskController::new(config.clone());
        Self {
            config,
            controller: Mutex::new(controller),
        }
    }

    pub(crate) fn with_controller<R>(&self, f: impl FnOnce(&mut KioskController) -> R) -> R {
        let mut controller = match self.controller.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kiosk_controller::KioskEvents;

    #[test]
    fn shell_state_routes_calls_to_one_controller() {
        let state = ShellState::new(RunConfig {
            watchdog_timeout: 5,
            ..RunConfig::default()
        });

        state.with_controller(|controller| controller.on_tick(true));
        state.with_controller(|controller| controller.on_tick(true));
        assert_eq!(
            state.with_controller(|controller| controller.watchdog().elapsed()),
            2
        );
    }

    #[test]
    fn only_handled_disposition_reports_handled() {
        assert!(SignalDisposition::Handled.is_handled());
        assert!(!SignalDisposition::Default.is_handled());
    }
}
