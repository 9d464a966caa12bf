//! 프로필 집계 HTTP 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 네 단계 집계 파이프라인
//! - Axum 기반 REST API
//! - 바이너리에 포함된 프레젠테이션 페이지
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`aggregator`]: 집계 파이프라인
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어
//! - [`openapi`]: OpenAPI 문서

pub mod aggregator;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use aggregator::ProfileAggregator;
pub use error::{UserDataFailure, USER_DATA_FAILURE_MESSAGE};
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use routes::*;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
