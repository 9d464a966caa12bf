//! 프로필 집계 API 서버.
//!
//! Axum 기반 HTTP 서버를 시작합니다.
//! 프레젠테이션 페이지, 프로필 집계, 헬스 체크, 메트릭 엔드포인트를 제공합니다.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use persona_api::metrics::setup_metrics_recorder;
use persona_api::middleware::metrics_layer;
use persona_api::openapi::openapi_router;
use persona_api::routes::create_api_router;
use persona_api::state::AppState;
use persona_api::ProfileAggregator;
use persona_core::{init_logging, AppConfig, LogConfig};
use persona_sources::HttpSources;

/// CORS 레이어 생성.
///
/// `CORS_ORIGINS`(쉼표 구분)가 설정되면 해당 origin만 허용합니다.
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(
    axum::extract::State(handle): axum::extract::State<PrometheusHandle>,
) -> String {
    handle.render()
}

/// 전체 라우터 구성.
fn create_router(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    request_timeout: Duration,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .merge(metrics_router)
        .merge(openapi_router())
        .merge(create_api_router().with_state(state))
        .layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors_layer())
}

/// OpenAPI 스펙 내보내기.
///
/// `--export-openapi` 플래그 또는 `EXPORT_OPENAPI` 환경변수가 설정된 경우
/// 스펙을 stdout으로 출력하고 종료합니다.
fn handle_export_openapi() -> Result<(), Box<dyn std::error::Error>> {
    use persona_api::openapi::ApiDoc;
    use utoipa::OpenApi as _;

    let export_flag = std::env::args().any(|arg| arg == "--export-openapi");
    let export_env = std::env::var("EXPORT_OPENAPI")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if export_flag || export_env {
        let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
        println!("{}", json);
        std::process::exit(0);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // OpenAPI 내보내기 처리 (서버 시작 전)
    handle_export_openapi()?;

    let config = AppConfig::load_default()?;

    // LOG_FORMAT이 유효하면 설정 파일보다 우선
    let mut log_config = LogConfig::from(&config.logging);
    let format_override = std::env::var("LOG_FORMAT")
        .ok()
        .map(|raw| log_config.override_format(&raw));
    init_logging(log_config)?;

    if let Some(Err(e)) = format_override {
        warn!(error = %e, "Ignoring LOG_FORMAT, keeping configured format");
    }

    info!("Starting Persona API server...");

    let metrics_handle = setup_metrics_recorder()?;
    info!("Prometheus metrics recorder initialized");

    let addr = config.server.socket_addr().map_err(|e| {
        error!(
            host = %config.server.host,
            port = config.server.port,
            error = %e,
            "Invalid socket address, check PERSONA__SERVER__HOST and PERSONA__SERVER__PORT"
        );
        e
    })?;

    let sources = HttpSources::from_config(&config.upstream)?;
    let state = Arc::new(AppState::new(ProfileAggregator::from(sources)));

    info!(version = %state.version, "Application state initialized");
    info!(
        has_exchange_rate_key = state.aggregator.rate_source().is_configured(),
        has_news_key = state.aggregator.news_source().is_configured(),
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Upstream configuration"
    );
    if !state.aggregator.rate_source().is_configured() {
        warn!("EXCHANGE_RATE_API_KEY not set, /api/user-data will fail at the rates stage");
    }
    if !state.aggregator.news_source().is_configured() {
        warn!("NEWS_API_KEY not set, /api/user-data will fail at the news stage");
    }

    let request_timeout = config.request_timeout();
    if request_timeout.as_secs() > config.server.request_timeout_secs {
        warn!(
            configured_secs = config.server.request_timeout_secs,
            effective_secs = request_timeout.as_secs(),
            "Request timeout raised to cover the upstream chain"
        );
    }

    let app = create_router(state, metrics_handle, request_timeout);

    info!(%addr, "API server listening");
    info!("Server is running on http://{}", addr);
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);
    info!("Metrics available at http://{}/metrics", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
/// 시그널 핸들러 설치에 실패하면 해당 시그널은 무시합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
