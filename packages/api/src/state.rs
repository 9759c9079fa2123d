use crate::config::{AppConfig, AppMode};
use crate::storage::{filesystem::FilesystemBlobStore, BlobStore};
use anyhow::Result;
use std::sync::{Arc, OnceLock};

/// Global application state containing all service implementations
pub struct AppState {
    pub storage: Arc<dyn BlobStore>,
    pub http: reqwest::Client,
    pub config: AppConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create AppState from configuration
    ///
    /// Ensures both blob directories exist so the static mounts have
    /// something to serve from the first request on.
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        match config.mode {
            AppMode::Local => tracing::info!("🔧 App Mode: LOCAL"),
            AppMode::Production => tracing::info!("🚀 App Mode: PRODUCTION"),
        }
        tracing::info!("   Uploads: {}", config.storage.uploads_dir);
        tracing::info!("   Outputs: {}", config.storage.outputs_dir);
        tracing::info!(
            "   Synthesis: {} (timeout {:?})",
            config.synthesis.endpoint,
            config.synthesis.timeout
        );

        std::fs::create_dir_all(&config.storage.uploads_dir)?;
        std::fs::create_dir_all(&config.storage.outputs_dir)?;

        let storage: Arc<dyn BlobStore> = Arc::new(FilesystemBlobStore::new(
            &config.storage.uploads_dir,
            &config.storage.outputs_dir,
        ));

        // Timeouts are applied per request from SynthesisConfig.
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            storage,
            http,
            config,
        })
    }

    /// Set the global AppState instance
    ///
    /// This should be called once at server startup.
    /// Panics if called more than once.
    pub fn set_global(state: Arc<Self>) {
        STATE
            .set(state)
            .expect("AppState::set_global called more than once");
    }

    /// Get the global AppState instance
    ///
    /// Panics if called before set_global.
    pub fn global() -> Arc<Self> {
        // In tests, check thread-local state first
        if let Some(test_state) = TEST_STATE.with(|s| s.borrow().clone()) {
            return test_state;
        }

        STATE
            .get()
            .expect("AppState::global called before set_global")
            .clone()
    }
}

/// Global state storage using OnceLock for thread-safe initialization
pub(crate) static STATE: OnceLock<Arc<AppState>> = OnceLock::new();

thread_local! {
    /// Thread-local state override for testing
    pub(crate) static TEST_STATE: std::cell::RefCell<Option<Arc<AppState>>> = const { std::cell::RefCell::new(None) };
}
