//! 집계 실패 응답 타입.
//!
//! 어느 단계에서 실패하든 클라이언트에는 동일한 형식의 500 응답이 전달됩니다.
//!
//! ```json
//! {
//!   "success": false,
//!   "message": "Error fetching data. Please try again.",
//!   "error": "Request failed with status code 404"
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use persona_core::AggregationError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 사용자에게 보여주는 고정 실패 메시지.
pub const USER_DATA_FAILURE_MESSAGE: &str = "Error fetching data. Please try again.";

/// 집계 실패 응답 (HTTP 500).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDataFailure {
    /// 항상 `false`
    pub success: bool,
    /// 고정 메시지
    pub message: String,
    /// 원본 에러 메시지
    pub error: String,
}

impl UserDataFailure {
    /// 원본 에러 메시지로 실패 응답을 생성합니다.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: USER_DATA_FAILURE_MESSAGE.to_string(),
            error: error.into(),
        }
    }
}

impl From<AggregationError> for UserDataFailure {
    fn from(err: AggregationError) -> Self {
        Self::new(err.to_string())
    }
}

impl IntoResponse for UserDataFailure {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}
