use std::path::{Path, PathBuf};

/// Base path override from the environment, for containers where the
/// platform config directory is not writable.
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("REELRECAP_BASE_PATH").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Self {
        if let Some(base) = base_path_override() {
            return Self {
                config_dir: base.clone(),
                log_dir: base.join("logs"),
            };
        }

        let base = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("reelrecap");
        Self {
            config_dir: base.clone(),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }
}

impl Default for PathManager {
    fn default() -> Self {
        Self::new()
    }
}
