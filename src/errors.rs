//! 统一错误类型
//!
//! 存储、配置和表单校验都返回 AppError

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not determine the user data directory")]
    NoDataDir,

    // 表单校验
    #[error("Please fill in all fields")]
    MissingField,

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid time (expected HH:MM): {0}")]
    InvalidTime(String),
}

pub type AppResult<T> = Result<T, AppError>;
