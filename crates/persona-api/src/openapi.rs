//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! 스펙은 `/api-docs/openapi.json` 경로에서 제공되며,
//! `--export-openapi` 플래그로 파일 없이 출력할 수도 있습니다.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use persona_core::{CompositeProfile, CountryInfo, ExchangeRates, NewsArticle, Person};

use crate::error::UserDataFailure;
use crate::routes::{ComponentStatus, HealthResponse, UpstreamHealth, UserDataResponse};

/// Persona API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Persona API",
        description = "랜덤 인물, 국가 정보, 환율, 최신 뉴스를 하나의 응답으로 집계합니다.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "profile", description = "프로필 집계"),
        (name = "health", description = "헬스 체크 - 서버 상태 확인")
    ),
    components(
        schemas(
            // ===== Profile =====
            UserDataResponse,
            UserDataFailure,
            CompositeProfile,
            Person,
            CountryInfo,
            ExchangeRates,
            NewsArticle,

            // ===== Health =====
            HealthResponse,
            UpstreamHealth,
            ComponentStatus,
        )
    ),
    paths(
        crate::routes::user_data::get_user_data,
        crate::routes::health::health_check,
        crate::routes::health::health_ready,
    )
)]
pub struct ApiDoc;

/// OpenAPI JSON 라우터 생성.
pub fn openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        assert!(json.contains("Persona API"));
        assert!(json.contains("/api/user-data"));
        assert!(json.contains("/health"));
        assert!(json.contains("/health/ready"));
    }

    #[test]
    fn test_openapi_contains_schemas() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string(&spec).unwrap();

        assert!(json.contains("UserDataResponse"));
        assert!(json.contains("UserDataFailure"));
        assert!(json.contains("CompositeProfile"));
        assert!(json.contains("HealthResponse"));
    }

    #[tokio::test]
    async fn test_openapi_router_serves_json() {
        let app: Router = openapi_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["paths"]["/api/user-data"].is_object());
    }
}
