use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use crate::errors::AppResult;

/// 初始化日志，写入文件（终端由 TUI 占用）
///
/// `RUST_LOG` 优先于配置中的 `log_level`
pub fn init(log_path: &Path, level: &str) -> AppResult<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // 已有全局 subscriber 时（重复初始化）保留原来的那个
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
    {
        debug!("logging already initialised: {e}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_keeps_first_subscriber() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("worklog.log");
        assert!(init(&log_path, "info").is_ok());
        assert!(init(&log_path, "debug").is_ok());
        assert!(log_path.exists());
    }
}
