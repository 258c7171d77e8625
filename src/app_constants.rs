use std::time::Duration;

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const MAIN_WINDOW_TITLE: &str = "kiosk-shell";
pub(crate) const BLANK_PAGE_URL: &str = "about:blank";

pub(crate) const DEFAULT_BASE_URI: &str = "http://127.0.0.1";
pub(crate) const DEFAULT_BASE_DIR: &str = "/tmp/kiosk";
pub(crate) const CACHE_DIR_NAME: &str = "cache";
pub(crate) const DATA_DIR_NAME: &str = "data";

pub(crate) const DEFAULT_WINDOW_WIDTH: f64 = 800.0;
pub(crate) const DEFAULT_WINDOW_HEIGHT: f64 = 600.0;

pub(crate) const PERIODIC_TICK_INTERVAL: Duration = Duration::from_secs(1);
pub(crate) const MIN_WATCHDOG_TIMEOUT_SECS: u32 = 2;

pub(crate) const RELOAD_DELAY_MIN_MS: u64 = 2500;
pub(crate) const RELOAD_DELAY_SPAN_MS: u64 = 5000;

// Help, version and rejected configurations all leave with a clean status.
pub(crate) const CONFIG_EXIT_CODE: i32 = 0;
pub(crate) const WEB_PROCESS_EXIT_CODE: i32 = 0;
