use std::{ffi::OsString, path::PathBuf};

use clap::{error::ErrorKind, CommandFactory, Parser};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::{DEFAULT_BASE_DIR, DEFAULT_BASE_URI, MIN_WATCHDOG_TIMEOUT_SECS};

/// Command line of the kiosk shell.
#[derive(Parser, Debug)]
#[command(name = "kiosk-shell", version, about)]
pub(crate) struct CommandLineArgs {
    /// Reload page if no requests done for timeout seconds
    #[arg(
        short = 'w',
        long = "watchdog",
        value_name = "TIMEOUT",
        value_parser = parse_watchdog_seconds,
        default_value = "0"
    )]
    watchdog: u32,

    /// Clear state on watchdog trigger
    #[arg(short = 'r', long = "watchdog-reset")]
    watchdog_reset: bool,

    /// Run in kiosk mode
    #[arg(short = 'k', long = "kiosk")]
    kiosk: bool,

    /// Accept all permission requests in kiosk mode
    #[arg(short = 'a', long = "accept-all")]
    accept_all: bool,

    /// Output debug info
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Hide the mouse cursor
    #[arg(short = 'm', long = "hide-mouse")]
    hide_mouse: bool,

    /// The URI to show
    #[arg(short = 'u', long = "uri", value_name = "URI", default_value = DEFAULT_BASE_URI)]
    uri: String,

    /// Ignore certificate errors
    #[arg(short = 'i', long = "ignore-cert")]
    ignore_cert: bool,

    /// Use ephemeral mode
    #[arg(short = 'e', long = "ephemeral")]
    ephemeral: bool,

    /// Store persistent files in this directory
    #[arg(short = 'b', long = "base-dir", value_name = "PATH", default_value = DEFAULT_BASE_DIR)]
    base_dir: String,

    /// Disable cache
    #[arg(short = 'c', long = "nocache")]
    nocache: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RunConfig {
    pub(crate) kiosk: bool,
    pub(crate) accept_all: bool,
    pub(crate) hide_mouse: bool,
    pub(crate) ignore_cert: bool,
    pub(crate) ephemeral: bool,
    pub(crate) reduce_cache: bool,
    pub(crate) debug: bool,
    /// Seconds without a resource load before the watchdog fires; 0 disables it.
    pub(crate) watchdog_timeout: u32,
    pub(crate) watchdog_reset: bool,
    pub(crate) base_uri: String,
    pub(crate) base_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            kiosk: false,
            accept_all: false,
            hide_mouse: false,
            ignore_cert: false,
            ephemeral: false,
            reduce_cache: false,
            debug: false,
            watchdog_timeout: 0,
            watchdog_reset: false,
            base_uri: DEFAULT_BASE_URI.to_string(),
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ConfigError {
    #[error("Accept all only makes sense in kiosk mode")]
    AcceptAllRequiresKiosk,
    #[error("Invalid URI '{uri}': {reason} (--uri is checked at startup rather than left to fail as a page load)")]
    InvalidUri { uri: String, reason: String },
    #[error("Base directory must not be empty unless running in ephemeral mode")]
    EmptyBaseDir,
}

#[derive(Debug)]
pub(crate) enum LaunchDecision {
    Run(RunConfig),
    /// Text for stdout (usage or version), then exit.
    Print(String),
    Reject(ConfigError),
}

/// Mirrors `atoi`: leading digits count, anything else reads as zero.
fn parse_watchdog_seconds(raw: &str) -> Result<u32, String> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned
        .chars()
        .take_while(|character| character.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return Ok(0);
    }

    digits
        .parse::<u32>()
        .map_err(|error| format!("watchdog timeout '{raw}' is out of range: {error}"))
}

pub(crate) fn effective_watchdog_timeout(requested: u32) -> u32 {
    if requested > 0 && requested < MIN_WATCHDOG_TIMEOUT_SECS {
        MIN_WATCHDOG_TIMEOUT_SECS
    } else {
        requested
    }
}

pub(crate) fn usage_text() -> String {
    CommandLineArgs::command().render_help().to_string()
}

impl CommandLineArgs {
    fn into_run_config(self) -> Result<RunConfig, ConfigError> {
        if self.accept_all && !self.kiosk {
            return Err(ConfigError::AcceptAllRequiresKiosk);
        }

        let base_uri = self.uri.trim().to_string();
        Url::parse(&base_uri).map_err(|error| ConfigError::InvalidUri {
            uri: base_uri.clone(),
            reason: error.to_string(),
        })?;

        if !self.ephemeral && self.base_dir.trim().is_empty() {
            return Err(ConfigError::EmptyBaseDir);
        }

        Ok(RunConfig {
            kiosk: self.kiosk,
            accept_all: self.accept_all,
            hide_mouse: self.hide_mouse,
            ignore_cert: self.ignore_cert,
            ephemeral: self.ephemeral,
            reduce_cache: self.nocache,
            debug: self.debug,
            watchdog_timeout: effective_watchdog_timeout(self.watchdog),
            watchdog_reset: self.watchdog_reset,
            base_uri,
            base_dir: PathBuf::from(self.base_dir),
        })
    }
}

pub(crate) fn decide_launch<I, T>(args: I) -> LaunchDecision
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match CommandLineArgs::try_parse_from(args) {
        Ok(parsed) => match parsed.into_run_config() {
            Ok(config) => LaunchDecision::Run(config),
            Err(error) => LaunchDecision::Reject(error),
        },
        Err(error) if error.kind() == ErrorKind::DisplayVersion => {
            LaunchDecision::Print(error.render().to_string())
        }
        // Help and every malformed invocation fall back to the usage text.
        Err(_) => LaunchDecision::Print(usage_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_config(args: &[&str]) -> RunConfig {
        let mut argv = vec!["kiosk-shell"];
        argv.extend_from_slice(args);
        match decide_launch(argv) {
            LaunchDecision::Run(config) => config,
            other => panic!("expected a runnable config, got {other:?}"),
        }
    }

    fn decision(args: &[&str]) -> LaunchDecision {
        let mut argv = vec!["kiosk-shell"];
        argv.extend_from_slice(args);
        decide_launch(argv)
    }

    #[test]
    fn no_arguments_yield_defaults() {
        assert_eq!(run_config(&[]), RunConfig::default());
    }

    #[test]
    fn watchdog_timeout_of_one_is_raised_to_two() {
        assert_eq!(run_config(&["-w", "1"]).watchdog_timeout, 2);
        assert_eq!(run_config(&["--watchdog=1"]).watchdog_timeout, 2);
        assert_eq!(run_config(&["-w", "0"]).watchdog_timeout, 0);
        assert_eq!(run_config(&["-w", "7"]).watchdog_timeout, 7);
    }

    #[test]
    fn watchdog_value_is_read_like_atoi() {
        assert_eq!(parse_watchdog_seconds("12s"), Ok(12));
        assert_eq!(parse_watchdog_seconds(" +9"), Ok(9));
        assert_eq!(parse_watchdog_seconds("abc"), Ok(0));
        assert_eq!(parse_watchdog_seconds("-3"), Ok(0));
        assert!(parse_watchdog_seconds("99999999999").is_err());
    }

    #[test]
    fn accept_all_without_kiosk_is_rejected() {
        assert!(matches!(
            decision(&["--accept-all"]),
            LaunchDecision::Reject(ConfigError::AcceptAllRequiresKiosk)
        ));
        assert!(matches!(
            decision(&["-a", "-m"]),
            LaunchDecision::Reject(ConfigError::AcceptAllRequiresKiosk)
        ));
    }

    #[test]
    fn accept_all_with_kiosk_proceeds() {
        let config = run_config(&["--kiosk", "--accept-all"]);
        assert!(config.kiosk);
        assert!(config.accept_all);
    }

    #[test]
    fn clustered_short_flags_are_recognized() {
        let config = run_config(&["-kmdeic", "-w5", "-r"]);
        assert!(config.kiosk);
        assert!(config.hide_mouse);
        assert!(config.debug);
        assert!(config.ephemeral);
        assert!(config.ignore_cert);
        assert!(config.reduce_cache);
        assert!(config.watchdog_reset);
        assert_eq!(config.watchdog_timeout, 5);
    }

    #[test]
    fn long_flags_with_values_are_recognized() {
        let config = run_config(&[
            "--uri",
            "https://example.test",
            "--base-dir=/var/lib/kiosk",
            "--nocache",
        ]);
        assert_eq!(config.base_uri, "https://example.test");
        assert_eq!(config.base_dir, PathBuf::from("/var/lib/kiosk"));
        assert!(config.reduce_cache);
    }

    #[test]
    fn help_and_unknown_flags_print_usage() {
        for args in [&["--help"][..], &["-h"][..], &["--bogus"][..], &["-z"][..]] {
            match decision(args) {
                LaunchDecision::Print(text) => assert!(text.contains("--watchdog")),
                other => panic!("expected usage for {args:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn relative_uri_is_rejected() {
        assert!(matches!(
            decision(&["--uri", "not a uri"]),
            LaunchDecision::Reject(ConfigError::InvalidUri { .. })
        ));
    }

    #[test]
    fn invalid_uri_message_says_it_is_checked_at_startup() {
        let LaunchDecision::Reject(error) = decision(&["-u", "not a uri"]) else {
            panic!("expected the uri to be rejected");
        };
        let message = error.to_string();
        assert!(message.contains("'not a uri'"));
        assert!(message.contains("checked at startup"));
    }

    #[test]
    fn empty_base_dir_is_only_allowed_when_ephemeral() {
        assert!(matches!(
            decision(&["--base-dir", ""]),
            LaunchDecision::Reject(ConfigError::EmptyBaseDir)
        ));
        assert!(run_config(&["--base-dir", "", "--ephemeral"]).ephemeral);
    }
}
