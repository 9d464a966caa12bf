//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭과 외부 API 호출 메트릭을 수집하고 `/metrics` 엔드포인트로 노출합니다.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

const LATENCY_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

/// Prometheus 메트릭 레코더를 설정하고 핸들을 반환합니다.
///
/// # 반환값
///
/// `/metrics` 엔드포인트에서 메트릭을 렌더링하기 위한 `PrometheusHandle`
///
/// # Errors
///
/// 레코더가 이미 설치되어 있으면 에러를 반환합니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )?
        .set_buckets_for_metric(
            Matcher::Full("upstream_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )?
        .install_recorder()
}

// ============================================================================
// HTTP 메트릭 헬퍼 함수
// ============================================================================

/// HTTP 요청 카운터 증가.
pub fn record_http_request(method: &str, path: &str) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string())
        .increment(1);
}

/// HTTP 응답 카운터 증가.
pub fn record_http_response(method: &str, path: &str, status: u16) {
    counter!(
        "http_responses_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// HTTP 요청 지속 시간 기록.
pub fn record_http_duration(method: &str, path: &str, duration_secs: f64) {
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

// ============================================================================
// 집계 메트릭 헬퍼 함수
// ============================================================================

/// 외부 API 호출 결과와 지연 시간 기록.
pub fn record_upstream_call(upstream: &str, success: bool, duration_secs: f64) {
    let outcome = if success { "success" } else { "error" };

    counter!(
        "upstream_requests_total",
        "upstream" => upstream.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    histogram!(
        "upstream_request_duration_seconds",
        "upstream" => upstream.to_string()
    )
    .record(duration_secs);
}

/// 집계 결과 카운터 증가.
///
/// `outcome`은 "success" 또는 실패한 단계 이름입니다.
pub fn record_aggregation(outcome: &'static str) {
    counter!("profile_aggregations_total", "outcome" => outcome).increment(1);
}

// ============================================================================
// 경로 라벨
// ============================================================================

/// 라우트에 매칭되지 않은 요청의 경로 라벨.
pub const UNMATCHED_PATH: &str = "unmatched";

/// 메트릭 라벨로 사용할 경로를 결정합니다.
///
/// 라우터가 매칭한 경로 템플릿이 있으면 그대로 사용하고, 없으면 임의의 경로로
/// 라벨 카디널리티가 늘어나지 않도록 [`UNMATCHED_PATH`]로 묶습니다.
pub fn path_label(matched: Option<&str>) -> String {
    matched.unwrap_or(UNMATCHED_PATH).to_string()
}
