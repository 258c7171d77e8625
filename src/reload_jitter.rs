use std::time::Duration;

use crate::{RELOAD_DELAY_MIN_MS, RELOAD_DELAY_SPAN_MS};

/// Supplies the wait before a failed page is loaded again.
pub(crate) trait ReloadDelaySource {
    fn next_reload_delay(&mut self) -> Duration;
}

/// Seeded xorshift64 generator spreading reloads over 2500..=7499 ms.
#[derive(Debug, Clone)]
pub(crate) struct XorShiftJitter {
    state: u64,
}

impl XorShiftJitter {
    pub(crate) fn seeded(seed: u64) -> Self {
        // xorshift is stuck at zero forever.
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    pub(crate) fn from_clock() -> Self {
        let now = chrono::Utc::now();
        let seed = now
            .timestamp_nanos_opt()
            .map(|nanos| nanos as u64)
            .unwrap_or_else(|| now.timestamp_millis() as u64);
        Self::seeded(seed ^ u64::from(std::process::id()))
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl ReloadDelaySource for XorShiftJitter {
    fn next_reload_delay(&mut self) -> Duration {
        Duration::from_millis(RELOAD_DELAY_MIN_MS + self.next_u64() % RELOAD_DELAY_SPAN_MS)
    }
}
