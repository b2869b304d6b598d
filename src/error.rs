use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// 删除失败时的默认提示
pub const DEFAULT_DELETE_MESSAGE: &str = "Failed to delete. Please try again.";

#[derive(Error, Debug)]
pub enum AppError {
    /// `error` 保存响应体里的 `error` 字段
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        error: Option<String>,
    },

    #[error("External service error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    ExternalService {
        status: u16,
        message: Option<String>,
        error: Option<String>,
    },

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

// 便利函数，用于创建常见错误
impl AppError {
    pub fn not_found(resource: &str) -> Self {
        Self::NotFound {
            message: format!("{} not found", resource),
            error: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self::Internal(msg.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// 服务端响应体里的 `error` 字段（不包括 `message`）
    pub fn server_error(&self) -> Option<&str> {
        match self {
            AppError::NotFound { error, .. } | AppError::ExternalService { error, .. } => error
                .as_deref()
                .filter(|error| !error.trim().is_empty()),
            _ => None,
        }
    }

    /// 展示给用户的错误信息：服务端的 `error` 字段，否则使用默认提示
    pub fn user_message(&self) -> String {
        self.server_error()
            .unwrap_or(DEFAULT_DELETE_MESSAGE)
            .to_string()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(err.to_string())
    }
}
