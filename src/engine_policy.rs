use crate::launch_config::RunConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheModel {
    /// Minimal caching, selected by `--nocache`.
    DocumentViewer,
    WebBrowser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TlsErrorsPolicy {
    Ignore,
    Fail,
}

/// Engine-wide settings fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EnginePolicy {
    pub(crate) cache_model: CacheModel,
    pub(crate) tls_errors: TlsErrorsPolicy,
    pub(crate) enable_plugins: bool,
    pub(crate) enable_java: bool,
}

impl EnginePolicy {
    pub(crate) fn for_config(config: &RunConfig) -> Self {
        Self {
            cache_model: if config.reduce_cache {
                CacheModel::DocumentViewer
            } else {
                CacheModel::WebBrowser
            },
            tls_errors: if config.ignore_cert {
                TlsErrorsPolicy::Ignore
            } else {
                TlsErrorsPolicy::Fail
            },
            enable_plugins: false,
            enable_java: false,
        }
    }
}
