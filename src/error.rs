//! 定义了整个 `groove-helper` 库的错误类型 `GrooveError`。

use std::io;
use thiserror::Error;

/// `groove-helper` 库的通用错误枚举。
#[derive(Error, Debug)]
pub enum GrooveError {
    /// 通用的 anyhow 错误
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    /// 网络请求失败 (源自 `reqwest::Error`，包括连接失败与超时)
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// 上游返回了非 2xx 状态码
    #[error("HTTP {status}: {message}")]
    Transport {
        /// HTTP 状态码
        status: u16,
        /// 状态描述
        message: String,
    },

    /// 上游返回了空的响应体
    #[error("响应体为空: {0}")]
    EmptyBody(String),

    /// 页面中找不到必需的标识字段，无法识别为目标实体
    #[error("未找到: {0}")]
    NotFound(String),

    /// 调用方请求了本适配器不提供的能力
    #[error("不支持的操作: {0}")]
    UnsupportedOperation(String),

    /// 续页标记不是由本库生成的
    #[error("无效的续页标记: '{0}'")]
    InvalidContinuation(String),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O 错误 (源自 `io::Error`)
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),
}

impl GrooveError {
    /// 该错误是否来自抓取层（网络、状态码或空响应）。
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Reqwest(_) | Self::Transport { .. } | Self::EmptyBody(_)
        )
    }
}

/// `GrooveError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, GrooveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        let status = GrooveError::Transport {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert!(status.is_transport());
        assert_eq!(status.to_string(), "HTTP 404: Not Found");

        assert!(GrooveError::EmptyBody("https://pagalnew.com".into()).is_transport());
        assert!(!GrooveError::NotFound("专辑".into()).is_transport());
        assert!(!GrooveError::UnsupportedOperation("字幕".into()).is_transport());
    }
}
