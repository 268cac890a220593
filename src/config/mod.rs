//! Kite Client Core 配置模块
//!
//! 该模块提供应用程序配置管理功能，包括：
//! - TOML 配置文件加载和解析
//! - 日志配置定义
//! - 后端 SDK 接入配置定义

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别（trace/debug/info/warn/error）
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 是否输出 target
    #[serde(default = "default_true")]
    pub with_target: bool,
    /// 是否输出线程 ID
    #[serde(default)]
    pub with_thread_ids: bool,
    /// 是否输出文件名
    #[serde(default)]
    pub with_file: bool,
    /// 是否输出行号
    #[serde(default)]
    pub with_line_number: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            with_target: true,
            with_thread_ids: false,
            with_file: false,
            with_line_number: false,
        }
    }
}

/// 会话列表模块配置
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationConfig {
    /// 订阅事件通道容量
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
    /// 激活屏幕时是否自动刷新列表
    #[serde(default = "default_true")]
    pub refresh_on_activate: bool,
}

fn default_event_buffer() -> usize {
    64
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            event_buffer: default_event_buffer(),
            refresh_on_activate: true,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 会话列表模块配置
    #[serde(default)]
    pub conversation: ConversationConfig,
    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 从指定路径加载 TOML 配置文件
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: AppConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

/// 加载配置；文件不存在时回退默认配置
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::warn!(path = %path.display(), "Config file not found, using defaults");
        Ok(AppConfig::default())
    }
}
