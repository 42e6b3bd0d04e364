use thiserror::Error;

/// 远程 API 调用错误
///
/// 只区分两类：
/// - 传输失败（网络不可达、响应无法解析）：`Transport` / `Decode`
/// - 业务拒绝（格式正确的失败响应，通常携带可读消息）：`Rejected`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("rejected by server (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl ApiError {
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        Self::Rejected { status, message }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Decode(_))
    }

    /// 服务端提供的错误消息（空字符串视为没有）
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// 面向用户的提示文本
    ///
    /// 业务拒绝时优先使用服务端消息，否则使用 `rejected_fallback`；
    /// 传输失败统一使用 `transport_text`。
    pub fn alert_text(&self, rejected_fallback: &str, transport_text: &str) -> String {
        if self.is_transport() {
            return transport_text.to_string();
        }
        self.server_message()
            .unwrap_or(rejected_fallback)
            .to_string()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
