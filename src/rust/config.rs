use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the models directory
pub const MODELS_DIR_ENV: &str = "ULASAN_MODELS_DIR";

/// Runtime settings for the demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the five model artifacts
    pub models_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models_dir: Self::default_models_dir(),
        }
    }
}

impl AppConfig {
    pub fn new<P: AsRef<Path>>(models_dir: P) -> Self {
        Self {
            models_dir: models_dir.as_ref().to_path_buf(),
        }
    }

    /// Uses an explicit directory when given, otherwise the default lookup.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        match explicit {
            Some(dir) => Self::new(dir),
            None => Self::default(),
        }
    }

    /// Returns the default models directory path
    pub fn default_models_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var(MODELS_DIR_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        // 2. Models next to the working directory
        let local = PathBuf::from("models");
        if local.is_dir() {
            return local;
        }

        // 3. Platform-specific data directory
        if let Some(data_dir) = dirs::data_dir() {
            return data_dir.join("ulasan").join("models");
        }

        // 4. Fall back to the relative path and let loading report it
        local
    }
}
