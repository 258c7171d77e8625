use tracing::{debug, warn, Level};
use tracing_subscriber::fmt::writer::MakeWriterExt;

use crate::launch_config::RunConfig;

/// Warnings and errors always reach stderr; `--debug` adds chatter on stdout.
pub(crate) fn init_logging(debug: bool) {
    let max_level = if debug { Level::DEBUG } else { Level::WARN };
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    if let Err(error) = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(writer)
        .with_target(false)
        .try_init()
    {
        eprintln!("failed to initialize logging: {error}");
    }
}

pub(crate) fn log_effective_config(config: &RunConfig) {
    match serde_json::to_string(config) {
        Ok(serialized) => debug!("effective configuration: {serialized}"),
        Err(error) => warn!("failed to serialize effective configuration: {error}"),
    }
}

pub(crate) fn log_shell_warning(message: &str) {
    warn!("{message}");
}
