#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WatchdogState {
    Running,
    /// A session-data clear is in flight.
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WatchdogTick {
    Disabled,
    Suspended,
    Advanced(u32),
    Fired,
}

/// Liveness counter advanced once per second and reset by resource loads.
#[derive(Debug, Clone)]
pub(crate) struct Watchdog {
    timeout: u32,
    elapsed: u32,
    state: WatchdogState,
}

impl Watchdog {
    pub(crate) fn new(timeout: u32) -> Self {
        Self {
            timeout,
            elapsed: 0,
            state: WatchdogState::Running,
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.timeout > 0
    }

    pub(crate) fn elapsed(&self) -> u32 {
        self.elapsed
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> WatchdogState {
        self.state
    }

    pub(crate) fn tick(&mut self) -> WatchdogTick {
        if !self.is_enabled() {
            return WatchdogTick::Disabled;
        }
        if self.state == WatchdogState::Suspended {
            return WatchdogTick::Suspended;
        }

        self.elapsed += 1;
        if self.elapsed >= self.timeout - 1 {
            self.elapsed = 0;
            return WatchdogTick::Fired;
        }
        WatchdogTick::Advanced(self.elapsed)
    }

    pub(crate) fn note_activity(&mut self) {
        self.elapsed = 0;
    }

    pub(crate) fn suspend(&mut self) {
        self.state = WatchdogState::Suspended;
    }

    pub(crate) fn resume(&mut self) {
        self.state = WatchdogState::Running;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_watchdog_never_counts() {
        let mut watchdog = Watchdog::new(0);
        for _ in 0..10 {
            assert_eq!(watchdog.tick(), WatchdogTick::Disabled);
        }
        assert_eq!(watchdog.elapsed(), 0);
    }

    #[test]
    fn fires_exactly_when_elapsed_reaches_timeout_minus_one() {
        for timeout in 2..12 {
            let mut watchdog = Watchdog::new(timeout);
            for expected in 1..timeout - 1 {
                assert_eq!(watchdog.tick(), WatchdogTick::Advanced(expected));
            }
            assert_eq!(watchdog.tick(), WatchdogTick::Fired, "timeout {timeout}");
            assert_eq!(watchdog.elapsed(), 0);
        }
    }

    #[test]
    fn activity_resets_the_counter_from_any_value() {
        let mut watchdog = Watchdog::new(10);
        for _ in 0..7 {
            watchdog.tick();
        }
        assert_eq!(watchdog.elapsed(), 7);
        watchdog.note_activity();
        assert_eq!(watchdog.elapsed(), 0);
        assert_eq!(watchdog.tick(), WatchdogTick::Advanced(1));
    }

    #[test]
    fn suspended_watchdog_does_not_advance() {
        let mut watchdog = Watchdog::new(3);
        watchdog.suspend();
        for _ in 0..5 {
            assert_eq!(watchdog.tick(), WatchdogTick::Suspended);
        }
        assert_eq!(watchdog.elapsed(), 0);

        watchdog.resume();
        assert_eq!(watchdog.state(), WatchdogState::Running);
        assert_eq!(watchdog.tick(), WatchdogTick::Advanced(1));
    }
}
