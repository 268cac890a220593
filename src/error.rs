//! Kite Client Core 错误模块
//!
//! - 统一定义客户端各层共享的错误类型
//! - 后端 SDK 返回的错误保留服务端 detail 文案，供弹窗提示直接使用

use thiserror::Error;

/// 客户端统一错误类型
#[derive(Debug, Error)]
pub enum ClientError {
    /// 后端 SDK 调用失败，detail 为服务端返回的详细描述
    #[error("backend request failed: {detail}")]
    Backend { detail: String },

    /// 订阅通道异常（断开、滞后等）
    #[error("subscription error: {0}")]
    Subscription(String),

    /// 配置加载或解析失败
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// 便捷构造：后端错误
    pub fn backend(detail: impl Into<String>) -> Self {
        ClientError::Backend {
            detail: detail.into(),
        }
    }

    /// 取服务端 detail 文案（非后端错误时退化为 Display 输出）
    pub fn detail(&self) -> String {
        match self {
            ClientError::Backend { detail } => detail.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_keeps_server_detail() {
        let err = ClientError::backend("conversation not found");
        assert_eq!(err.detail(), "conversation not found");
        assert_eq!(
            err.to_string(),
            "backend request failed: conversation not found"
        );
    }

    #[test]
    fn non_backend_detail_falls_back_to_display() {
        let err = ClientError::Subscription("channel closed".into());
        assert_eq!(err.detail(), "subscription error: channel closed");
    }
}
