//! Kite Client Core 公共库
//!
//! 提供统一的配置加载、错误类型与日志初始化功能

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{
    AppConfig, ConversationConfig, LoggingConfig, load_config, load_config_or_default,
};
pub use error::{ClientError, Result};
pub use telemetry::init_telemetry_from_config;
