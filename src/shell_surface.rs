use std::time::Duration;

use crate::{CursorTarget, ShellEffect};

/// The window, view and cursor handles effects are applied to.
pub(crate) trait ShellSurface {
    fn load_uri(&self, uri: &str);
    /// Completion must be reported back through `KioskEvents::on_session_cleared`.
    fn clear_website_data(&self);
    fn schedule_reload(&self, uri: &str, delay: Duration);
    fn apply_kiosk_window_state(&self);
    fn hide_cursor(&self, target: CursorTarget);
    fn present_window(&self);
    fn set_window_title(&self, title: &str);
    fn quit(&self);
}

pub(crate) fn apply_effects<S>(surface: &S, effects: Vec<ShellEffect>)
where
    S: ShellSurface + ?Sized,
{
    for effect in effects {
        match effect {
            ShellEffect::LoadUri(uri) => surface.load_uri(&uri),
            ShellEffect::ClearWebsiteData => surface.clear_website_data(),
            ShellEffect::ScheduleReload { uri, delay } => surface.schedule_reload(&uri, delay),
            ShellEffect::ApplyKioskWindowState => surface.apply_kiosk_window_state(),
            ShellEffect::HideCursor(target) => surface.hide_cursor(target),
            ShellEffect::PresentWindow => surface.present_window(),
            ShellEffect::SetWindowTitle(title) => surface.set_window_title(&title),
            ShellEffect::Quit => surface.quit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{
        kiosk_controller::{KioskController, KioskEvents},
        launch_config::RunConfig,
        reload_jitter::XorShiftJitter,
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum SurfaceCall {
        Load(String),
        Clear,
        Reload(String, Duration),
        KioskState,
        HideCursor(CursorTarget),
        Present,
        Title(String),
        Quit,
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: RefCell<Vec<SurfaceCall>>,
    }

    impl RecordingSurface {
        fn take(&self) -> Vec<SurfaceCall> {
            self.calls.take()
        }
    }

    impl ShellSurface for RecordingSurface {
        fn load_uri(&self, uri: &str) {
            self.calls.borrow_mut().push(SurfaceCall::Load(uri.to_string()));
        }

        fn clear_website_data(&self) {
            self.calls.borrow_mut().push(SurfaceCall::Clear);
        }

        fn schedule_reload(&self, uri: &str, delay: Duration) {
            self.calls
                .borrow_mut()
                .push(SurfaceCall::Reload(uri.to_string(), delay));
        }

        fn apply_kiosk_window_state(&self) {
            self.calls.borrow_mut().push(SurfaceCall::KioskState);
        }

        fn hide_cursor(&self, target: CursorTarget) {
            self.calls.borrow_mut().push(SurfaceCall::HideCursor(target));
        }

        fn present_window(&self) {
            self.calls.borrow_mut().push(SurfaceCall::Present);
        }

        fn set_window_title(&self, title: &str) {
            self.calls.borrow_mut().push(SurfaceCall::Title(title.to_string()));
        }

        fn quit(&self) {
            self.calls.borrow_mut().push(SurfaceCall::Quit);
        }
    }

    #[test]
    fn effects_are_applied_in_order() {
        let surface = RecordingSurface::default();
        apply_effects(
            &surface,
            vec![
                ShellEffect::ApplyKioskWindowState,
                ShellEffect::HideCursor(CursorTarget::View),
                ShellEffect::LoadUri("https://a.test/".to_string()),
                ShellEffect::SetWindowTitle("A".to_string()),
                ShellEffect::Quit,
            ],
        );
        assert_eq!(
            surface.take(),
            vec![
                SurfaceCall::KioskState,
                SurfaceCall::HideCursor(CursorTarget::View),
                SurfaceCall::Load("https://a.test/".to_string()),
                SurfaceCall::Title("A".to_string()),
                SurfaceCall::Quit,
            ]
        );
    }

    #[test]
    fn watchdog_reset_round_trip_reaches_the_surface() {
        let surface = RecordingSurface::default();
        let mut controller = KioskController::with_delay_source(
            RunConfig {
                kiosk: true,
                hide_mouse: true,
                watchdog_timeout: 2,
                watchdog_reset: true,
                base_uri: "https://home.test".to_string(),
                ..RunConfig::default()
            },
            XorShiftJitter::seeded(3),
        );

        apply_effects(&surface, controller.on_tick(false));
        assert_eq!(
            surface.take(),
            vec![
                SurfaceCall::Clear,
                SurfaceCall::HideCursor(CursorTarget::Window),
                SurfaceCall::HideCursor(CursorTarget::View),
                SurfaceCall::Present,
            ]
        );

        apply_effects(&surface, controller.on_session_cleared(Ok(())));
        assert_eq!(
            surface.take(),
            vec![SurfaceCall::Load("https://home.test".to_string())]
        );
    }

    #[test]
    fn load_failure_reaches_the_surface_as_one_reload() {
        let surface = RecordingSurface::default();
        let mut controller =
            KioskController::with_delay_source(RunConfig::default(), XorShiftJitter::seeded(9));

        apply_effects(&surface, controller.on_load_failed("https://x.test/", "refused"));
        let calls = surface.take();
        assert_eq!(calls.len(), 1);
        let SurfaceCall::Reload(uri, delay) = &calls[0] else {
            panic!("expected a reload, got {calls:?}");
        };
        assert_eq!(uri, "https://x.test/");
        assert!((2500..=7499).contains(&delay.as_millis()));
    }
}
