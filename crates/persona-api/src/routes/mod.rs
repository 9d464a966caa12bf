//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/` - 프레젠테이션 페이지 (`/script.js`, `/style.css` 포함)
//! - `/api/user-data` - 프로필 집계
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)

pub mod health;
pub mod static_files;
pub mod user_data;

pub use health::{health_router, ComponentStatus, HealthResponse, UpstreamHealth};
pub use static_files::static_router;
pub use user_data::{user_data_router, UserDataResponse};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(static_router())
        .merge(user_data_router())
        .merge(health_router())
}
