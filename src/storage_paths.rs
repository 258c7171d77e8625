use std::path::{Path, PathBuf};

use crate::{launch_config::RunConfig, CACHE_DIR_NAME, DATA_DIR_NAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PersistentDirs {
    pub(crate) cache_dir: PathBuf,
    pub(crate) data_dir: PathBuf,
}

/// Where the engine keeps cookies, caches and site storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StorageMode {
    Persistent(PersistentDirs),
    Ephemeral,
}

impl PersistentDirs {
    pub(crate) fn under(base_dir: &Path) -> Self {
        Self {
            cache_dir: base_dir.join(CACHE_DIR_NAME),
            data_dir: base_dir.join(DATA_DIR_NAME),
        }
    }
}

impl StorageMode {
    pub(crate) fn for_config(config: &RunConfig) -> Self {
        if config.ephemeral {
            Self::Ephemeral
        } else {
            Self::Persistent(PersistentDirs::under(&config.base_dir))
        }
    }

    pub(crate) fn persistent_dirs(&self) -> Option<&PersistentDirs> {
        match self {
            Self::Persistent(dirs) => Some(dirs),
            Self::Ephemeral => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistent_mode_derives_cache_and_data_under_base_dir() {
        let config = RunConfig {
            base_dir: PathBuf::from("/srv/kiosk"),
            ..RunConfig::default()
        };

        let mode = StorageMode::for_config(&config);
        let dirs = mode.persistent_dirs().expect("persistent dirs");
        assert_eq!(dirs.cache_dir, PathBuf::from("/srv/kiosk/cache"));
        assert_eq!(dirs.data_dir, PathBuf::from("/srv/kiosk/data"));
        assert_ne!(mode, StorageMode::Ephemeral);
    }

    #[test]
    fn default_base_dir_is_tmp_kiosk() {
        let mode = StorageMode::for_config(&RunConfig::default());
        assert_eq!(
            mode.persistent_dirs().map(|dirs| dirs.data_dir.clone()),
            Some(PathBuf::from("/tmp/kiosk/data"))
        );
    }

    #[test]
    fn ephemeral_mode_derives_no_directories() {
        let config = RunConfig {
            ephemeral: true,
            base_dir: PathBuf::from("/srv/kiosk"),
            ..RunConfig::default()
        };

        let mode = StorageMode::for_config(&config);
        assert_eq!(mode, StorageMode::Ephemeral);
        assert!(mode.persistent_dirs().is_none());
    }
}
