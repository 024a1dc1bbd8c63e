use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppResult};

const APP_DIR: &str = "worklog";

/// 应用配置 (~/.config/worklog/config.toml)，所有字段可省略
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub page_size: usize,
    pub max_entries: usize,
    pub storage_key: String,
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_entries: 120,
            storage_key: "workRecords".to_string(),
            data_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// 从默认路径加载；文件不存在时使用默认值
    pub fn load() -> AppResult<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.page_size == 0 {
            return Err(AppError::Config("page_size must be at least 1".to_string()));
        }
        if self.max_entries == 0 {
            return Err(AppError::Config("max_entries must be at least 1".to_string()));
        }
        if self.storage_key.trim().is_empty() {
            return Err(AppError::Config("storage_key must not be empty".to_string()));
        }
        Ok(())
    }

    /// 数据目录 (~/.local/share/worklog/)，不存在时创建
    pub fn data_dir(&self) -> AppResult<PathBuf> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir().ok_or(AppError::NoDataDir)?.join(APP_DIR),
        };
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
