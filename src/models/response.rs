use serde::{Deserialize, Serialize};

/// 服务端错误响应格式：`{"error": "..."}` 或 `{"message": "..."}`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// 只取 `error` 字段，这是可以直接展示给用户的文案
    pub fn error_text(&self) -> Option<String> {
        self.error.clone().filter(|msg| !msg.trim().is_empty())
    }

    /// 用于日志：`error` 优先，其次 `message`
    pub fn describe(&self) -> Option<String> {
        self.error_text()
            .or_else(|| self.message.clone().filter(|msg| !msg.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_field_takes_precedence() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"error": "User not found", "message": "ignored"}"#).unwrap();
        assert_eq!(body.error_text(), Some("User not found".to_string()));
        assert_eq!(body.describe(), Some("User not found".to_string()));

        let body: ErrorResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.error_text(), None);
        assert_eq!(body.describe(), None);
    }

    #[test]
    fn test_message_field_is_never_error_text() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"message": "Not following bob"}"#).unwrap();
        assert_eq!(body.error_text(), None);
        assert_eq!(body.describe(), Some("Not following bob".to_string()));
    }
}
