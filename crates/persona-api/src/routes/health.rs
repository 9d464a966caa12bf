//! 헬스 체크 endpoint.
//!
//! 서버 상태 확인을 위한 헬스 체크 엔드포인트를 제공합니다.
//! 외부 API는 호출하지 않고, 호출에 필요한 설정이 갖춰져 있는지만 보고합니다.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

/// 헬스 체크 응답 구조체.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// 전체 서비스 상태 ("healthy" | "degraded")
    pub status: String,

    /// API 버전
    pub version: String,

    /// 서버 업타임(초)
    pub uptime_secs: i64,

    /// 현재 시간 (ISO 8601)
    pub timestamp: String,

    /// 외부 API별 상태
    pub upstreams: UpstreamHealth,
}

/// 외부 API별 상태.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpstreamHealth {
    /// 1단계: 인물 소스
    pub person: ComponentStatus,

    /// 2단계: 국가 소스
    pub country: ComponentStatus,

    /// 3단계: 환율 소스
    pub rates: ComponentStatus,

    /// 4단계: 뉴스 소스
    pub news: ComponentStatus,
}

impl UpstreamHealth {
    /// 모든 외부 API가 호출 가능한 설정인지 확인.
    pub fn all_configured(&self) -> bool {
        [&self.person, &self.country, &self.rates, &self.news]
            .iter()
            .all(|c| c.status == ComponentStatus::CONFIGURED)
    }
}

/// 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// 상태 ("configured" | "not_configured")
    pub status: String,

    /// 외부 API 이름
    pub upstream: String,
}

impl ComponentStatus {
    const CONFIGURED: &'static str = "configured";
    const NOT_CONFIGURED: &'static str = "not_configured";

    /// 설정 완료 상태.
    pub fn configured(upstream: impl Into<String>) -> Self {
        Self {
            status: Self::CONFIGURED.to_string(),
            upstream: upstream.into(),
        }
    }

    /// 미설정 상태 (API 키 없음).
    pub fn not_configured(upstream: impl Into<String>) -> Self {
        Self {
            status: Self::NOT_CONFIGURED.to_string(),
            upstream: upstream.into(),
        }
    }

    fn from_flag(upstream: &str, configured: bool) -> Self {
        if configured {
            Self::configured(upstream)
        } else {
            Self::not_configured(upstream)
        }
    }
}

/// 간단한 헬스 체크 (liveness probe용).
///
/// 서버가 응답 가능한 상태인지만 확인합니다.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "서버 동작 중", body = String)
    ),
    tag = "health"
)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// 상세 헬스 체크 (readiness probe용).
///
/// API 키가 필요한 외부 API 중 하나라도 설정되지 않았으면 집계가 항상 실패하므로
/// `degraded`와 503을 반환합니다.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "모든 외부 API 설정 완료", body = HealthResponse),
        (status = 503, description = "일부 외부 API 미설정", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let aggregator = &state.aggregator;

    let upstreams = UpstreamHealth {
        person: ComponentStatus::configured(aggregator.person_source().name()),
        country: ComponentStatus::configured(aggregator.country_source().name()),
        rates: ComponentStatus::from_flag(
            aggregator.rate_source().name(),
            aggregator.rate_source().is_configured(),
        ),
        news: ComponentStatus::from_flag(
            aggregator.news_source().name(),
            aggregator.news_source().is_configured(),
        ),
    };

    let (status, status_code) = if upstreams.all_configured() {
        ("healthy", StatusCode::OK)
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        upstreams,
    };

    (status_code, Json(response))
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(health_ready))
}
