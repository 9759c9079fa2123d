use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Local,
    Production,
}

impl AppMode {
    pub fn from_env() -> Self {
        match std::env::var("APP_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "local" => AppMode::Local,
            _ => AppMode::Production, // Default to production for safety
        }
    }
}

/// Location of the two blob areas on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub uploads_dir: String,
    pub outputs_dir: String,
}

/// How to reach the external image-synthesis service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Endpoint accepting `{userPath, clothPath}` and returning `{resultUrl}`.
    pub endpoint: String,
    /// Directory prefix the synthesis service expects uploaded files under.
    /// Defaults to the uploads dir, which is correct when both processes
    /// share a filesystem.
    pub input_dir: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: AppMode,
    /// Overrides the request Host header when building client-facing URLs.
    pub public_base_url: Option<String>,
    pub storage: StorageConfig,
    pub synthesis: SynthesisConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mode = AppMode::from_env();

        let (default_uploads, default_outputs) = match mode {
            AppMode::Local => (".dev/uploads", ".dev/outputs"),
            AppMode::Production => ("uploads", "outputs"),
        };
        let uploads_dir = env_or("UPLOADS_DIR", default_uploads);
        let outputs_dir = env_or("OUTPUTS_DIR", default_outputs);

        let timeout_secs = std::env::var("SYNTHESIS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        Self {
            mode,
            public_base_url: std::env::var("APP_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            synthesis: SynthesisConfig {
                endpoint: env_or("SYNTHESIS_URL", "http://localhost:5000/process"),
                input_dir: env_or("SYNTHESIS_INPUT_DIR", &uploads_dir),
                timeout: Duration::from_secs(timeout_secs),
            },
            storage: StorageConfig {
                uploads_dir,
                outputs_dir,
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // The process environment is shared; serialize every test that touches it.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_app_mode_defaults_to_production() {
        let _guard = env_guard();
        std::env::remove_var("APP_MODE");
        assert_eq!(AppMode::from_env(), AppMode::Production);
    }

    #[test]
    fn test_app_mode_local() {
        let _guard = env_guard();
        std::env::set_var("APP_MODE", "local");
        assert_eq!(AppMode::from_env(), AppMode::Local);
        std::env::remove_var("APP_MODE");
    }

    #[test]
    fn test_app_mode_case_insensitive() {
        let _guard = env_guard();
        std::env::set_var("APP_MODE", "LOCAL");
        assert_eq!(AppMode::from_env(), AppMode::Local);
        std::env::remove_var("APP_MODE");
    }

    #[test]
    fn test_app_mode_invalid_defaults_to_production() {
        let _guard = env_guard();
        std::env::set_var("APP_MODE", "invalid");
        assert_eq!(AppMode::from_env(), AppMode::Production);
        std::env::remove_var("APP_MODE");
    }

    #[test]
    fn test_synthesis_timeout_default_is_30s() {
        let _guard = env_guard();
        std::env::remove_var("SYNTHESIS_TIMEOUT_SECS");
        let config = AppConfig::from_env();
        assert_eq!(config.synthesis.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_synthesis_timeout_override() {
        let _guard = env_guard();
        std::env::set_var("SYNTHESIS_TIMEOUT_SECS", "5");
        let config = AppConfig::from_env();
        assert_eq!(config.synthesis.timeout, Duration::from_secs(5));
        std::env::remove_var("SYNTHESIS_TIMEOUT_SECS");
    }

    #[test]
    fn test_blank_base_url_is_ignored() {
        let _guard = env_guard();
        std::env::set_var("APP_BASE_URL", "  ");
        let config = AppConfig::from_env();
        assert_eq!(config.public_base_url, None);
        std::env::remove_var("APP_BASE_URL");
    }

    #[test]
    fn test_synthesis_input_dir_follows_uploads_dir() {
        let _guard = env_guard();
        std::env::remove_var("SYNTHESIS_INPUT_DIR");
        std::env::set_var("UPLOADS_DIR", ".test-cfg-uploads");
        let config = AppConfig::from_env();
        assert_eq!(config.synthesis.input_dir, ".test-cfg-uploads");
        std::env::remove_var("UPLOADS_DIR");
    }
}
