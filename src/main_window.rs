use tauri::{AppHandle, WebviewUrl, WebviewWindow, WebviewWindowBuilder};
use tracing::debug;
use url::Url;

use crate::{
    launch_config::RunConfig, storage_paths::StorageMode, BLANK_PAGE_URL, DEFAULT_WINDOW_HEIGHT,
    DEFAULT_WINDOW_WIDTH, MAIN_WINDOW_LABEL, MAIN_WINDOW_TITLE,
};

/// Points the cache root at `<baseDir>/cache`; must run before the toolkit starts.
///
/// WebKit appends its program name, so the cache lands in `<baseDir>/cache/<prgname>/`.
/// `XDG_CACHE_HOME` is process-wide: GTK, fontconfig and any child process see it too.
pub(crate) fn prepare_storage_environment(storage: &StorageMode) {
    let Some(dirs) = storage.persistent_dirs() else {
        debug!("ephemeral profile, no persistent directories");
        return;
    };

    debug!(
        "Cache directory: {}\nData directory: {}",
        dirs.cache_dir.display(),
        dirs.data_dir.display()
    );
    #[cfg(target_os = "linux")]
    std::env::set_var("XDG_CACHE_HOME", &dirs.cache_dir);
}

pub(crate) fn build_main_window(
    app_handle: &AppHandle,
    config: &RunConfig,
    storage: &StorageMode,
) -> Result<WebviewWindow, String> {
    let blank = Url::parse(BLANK_PAGE_URL)
        .map_err(|error| format!("Invalid placeholder page url: {error}"))?;

    let mut builder =
        WebviewWindowBuilder::new(app_handle, MAIN_WINDOW_LABEL, WebviewUrl::External(blank))
            .title(MAIN_WINDOW_TITLE)
            .focused(true);

    builder = match storage {
        StorageMode::Persistent(dirs) => builder.data_directory(dirs.data_dir.clone()),
        StorageMode::Ephemeral => builder.incognito(true),
    };

    builder = if config.kiosk {
        builder
            .fullscreen(true)
            .decorations(false)
            .always_on_top(true)
            .visible_on_all_workspaces(true)
            .closable(false)
    } else {
        builder.inner_size(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)
    };

    builder
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))
}
