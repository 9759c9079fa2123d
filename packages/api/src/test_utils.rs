use crate::config::{AppConfig, AppMode, StorageConfig, SynthesisConfig};
use crate::state::AppState;
use axum::Router;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

// Tests that go through AppState::global must not observe each other's
// thread-local state, so the whole harness is serialized.
static TEST_MUTEX: Mutex<()> = Mutex::new(());

pub struct TestContext {
    pub state: Arc<AppState>,
    uploads_dir: PathBuf,
    outputs_dir: PathBuf,
    _guard: MutexGuard<'static, ()>,
}

impl TestContext {
    /// Context whose synthesis endpoint is unroutable: good for every test
    /// that must not reach an upstream.
    pub async fn new() -> Self {
        Self::with_synthesis("http://127.0.0.1:1/process", Duration::from_secs(30)).await
    }

    pub async fn with_synthesis(endpoint: &str, timeout: Duration) -> Self {
        let guard = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let test_id = Uuid::new_v4();
        let uploads_dir = PathBuf::from(format!(".test-uploads-{test_id}"));
        let outputs_dir = PathBuf::from(format!(".test-outputs-{test_id}"));

        let config = AppConfig {
            mode: AppMode::Local,
            public_base_url: None,
            storage: StorageConfig {
                uploads_dir: uploads_dir.to_string_lossy().to_string(),
                outputs_dir: outputs_dir.to_string_lossy().to_string(),
            },
            synthesis: SynthesisConfig {
                endpoint: endpoint.to_string(),
                input_dir: uploads_dir.to_string_lossy().to_string(),
                timeout,
            },
        };

        let state = Arc::new(
            AppState::from_config(config)
                .await
                .expect("Failed to create test state"),
        );

        crate::state::TEST_STATE.with(|s| *s.borrow_mut() = Some(state.clone()));

        Self {
            state,
            uploads_dir,
            outputs_dir,
            _guard: guard,
        }
    }

    pub fn router(&self) -> Router {
        crate::relay::router(&self.state.config)
    }

    pub fn uploads_on_disk(&self) -> usize {
        count_files(&self.uploads_dir)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        crate::state::TEST_STATE.with(|s| *s.borrow_mut() = None);
        let _ = std::fs::remove_dir_all(&self.uploads_dir);
        let _ = std::fs::remove_dir_all(&self.outputs_dir);
    }
}

fn count_files(dir: &PathBuf) -> usize {
    std::fs::read_dir(dir).map(|rd| rd.count()).unwrap_or(0)
}
