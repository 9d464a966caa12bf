//! 외부 소스 에러 타입.

use thiserror::Error;

/// 외부 API 호출 관련 에러.
#[derive(Debug, Error)]
pub enum SourceError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    Network(String),

    /// 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 2xx가 아닌 응답 (본문에서 에러 메시지를 찾지 못한 경우)
    #[error("Request failed with status code {status}")]
    Http { status: u16, body: String },

    /// 외부 API가 보고한 에러
    #[error("{upstream} error: {message}")]
    Upstream {
        upstream: &'static str,
        message: String,
    },

    /// 파싱/역직렬화 에러
    #[error("Parse error: {0}")]
    Parse(String),

    /// 응답에 필수 필드가 없음
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// 조회 결과 없음
    #[error("Not found: {0}")]
    NotFound(String),

    /// API 키 미설정
    #[error("API key not configured for {0}")]
    MissingApiKey(&'static str),

    /// 잘못된 기본 URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout(err.to_string())
        } else if err.is_decode() {
            SourceError::Parse(err.to_string())
        } else {
            SourceError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = SourceError::Http {
            status: 429,
            body: "slow down".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed with status code 429");
    }

    #[test]
    fn test_upstream_error_display() {
        let err = SourceError::Upstream {
            upstream: "newsapi",
            message: "Your API key is invalid".to_string(),
        };
        assert_eq!(err.to_string(), "newsapi error: Your API key is invalid");
    }

    #[test]
    fn test_missing_api_key_display() {
        assert_eq!(
            SourceError::MissingApiKey("newsapi").to_string(),
            "API key not configured for newsapi"
        );
    }

    #[test]
    fn test_from_serde_error() {
        let err: SourceError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert!(matches!(err, SourceError::Parse(_)));
    }
}
