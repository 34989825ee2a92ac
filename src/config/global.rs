use crate::config::schema::GlobalConfig;
use crate::config::validation::validate_global_config;
use crate::core::error::Result;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tokio::fs;

const GLOBAL_CONFIG_FILE: &str = "config.toml";

pub struct GlobalConfigManager {
    config_dir: PathBuf,
    config_path: PathBuf,
}

impl GlobalConfigManager {
    pub fn new() -> Result<Self> {
        Ok(Self::with_dir(Self::get_config_dir()))
    }

    pub fn with_dir(config_dir: PathBuf) -> Self {
        let config_path = config_dir.join(GLOBAL_CONFIG_FILE);
        Self {
            config_dir,
            config_path,
        }
    }

    fn get_config_dir() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("com", "ghostenv", "ghostenv") {
            proj_dirs.config_dir().to_path_buf()
        } else {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".ghostenv")
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    pub async fn load(&self) -> Result<GlobalConfig> {
        if !self.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&self.config_path).await?;
        let config: GlobalConfig = toml::from_str(&content)?;
        validate_global_config(&config)?;
        Ok(config)
    }

    pub async fn save(&self, config: &GlobalConfig) -> Result<()> {
        validate_global_config(config)?;
        fs::create_dir_all(&self.config_dir).await?;
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await?;
        Ok(())
    }

    /// Write the default configuration unless a file already exists.
    /// Returns `true` when a file was created.
    pub async fn ensure_initialized(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }
        self.save(&GlobalConfig::default()).await?;
        Ok(true)
    }
}
