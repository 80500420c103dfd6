// Application state module
// Holds the loaded configuration and the SPA adapter selected by it

use std::sync::Arc;
use tokio::sync::Notify;

use super::types::{Config, ServeMode};
use crate::handler::static_files::StaticFiles;
use crate::spa::{FsStore, Interceptor, Responder, ResourceStore};

/// SPA deployment selected by `site.mode`
#[derive(Debug, Clone)]
pub enum Site<S> {
    Standalone(Responder<S>),
    Intercepted {
        interceptor: Interceptor<S>,
        files: StaticFiles<S>,
    },
}

impl<S: ResourceStore + Clone> Site<S> {
    pub fn from_config(config: &Config, store: S) -> Self {
        let fallback = config.fallback_path();
        match config.site.mode {
            ServeMode::Standalone => {
                Self::Standalone(Responder::new(store, fallback, config.site.index_file()))
            }
            ServeMode::Interceptor => Self::Intercepted {
                interceptor: Interceptor::new(
                    store.clone(),
                    fallback,
                    config.site.index_files.clone(),
                ),
                files: StaticFiles::new(store, config.site.index_files.clone()),
            },
        }
    }
}

/// Application state
pub struct AppState<S = FsStore> {
    pub config: Config,
    pub site: Site<S>,

    /// Notified once when the process is asked to stop
    pub shutdown_signal: Arc<Notify>,
}

impl AppState<FsStore> {
    /// Create `AppState` serving files from `site.root`
    pub fn new(config: &Config) -> Self {
        Self::with_store(config, FsStore::new(&config.site.root))
    }
}

impl<S: ResourceStore + Clone> AppState<S> {
    pub fn with_store(config: &Config, store: S) -> Self {
        Self {
            config: config.clone(),
            site: Site::from_config(config, store),
            shutdown_signal: Arc::new(Notify::new()),
        }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
