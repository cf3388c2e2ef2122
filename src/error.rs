//! Failure taxonomy.
//!
//! Display strings are user-facing: the presentation layer shows them in
//! toast notifications, so they are written in the application language.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TutorError {
    /// The completion endpoint answered with a non-2xx status. The message
    /// is whatever the service reported in its error envelope.
    #[error("API请求失败（{status}）：{message}")]
    Api { status: u16, message: String },

    /// The request never produced a usable HTTP response.
    #[error("网络错误：{reason}")]
    Network { reason: String },

    /// The response arrived but the completion envelope did not parse.
    #[error("响应格式无效：{reason}")]
    Envelope { reason: String },

    /// A well-formed envelope with nothing in it.
    #[error("API返回了空回复")]
    EmptyResponse,

    /// Chart payload recovery failed: no JSON found or the JSON is invalid.
    #[error("无法从回复中解析图表数据：{reason}")]
    ChartData { reason: String },

    #[error("缺少环境变量：{name}")]
    MissingVar { name: String },

    #[error("无效的API地址：{url}")]
    InvalidUrl { url: String },
}

pub type TutorResult<T> = Result<T, TutorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_carries_service_message() {
        let error = TutorError::Api {
            status: 429,
            message: "Rate limit exceeded".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("429"));
        assert!(display.contains("Rate limit exceeded"));
    }

    #[test]
    fn test_display_is_localized() {
        let error = TutorError::EmptyResponse;
        assert!(error.to_string().contains("空回复"));
    }
}
