//! 프로필 집계 endpoint.
//!
//! `GET /api/user-data` 한 번에 네 개의 외부 API를 순서대로 호출하여
//! 인물, 국가, 환율, 뉴스를 하나의 응답으로 돌려줍니다.

use axum::{extract::State, routing::get, Json, Router};
use persona_core::CompositeProfile;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::error::UserDataFailure;
use crate::state::AppState;

/// 집계 성공 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDataResponse {
    /// 항상 `true`
    pub success: bool,
    /// 집계 결과
    pub data: CompositeProfile,
}

impl From<CompositeProfile> for UserDataResponse {
    fn from(data: CompositeProfile) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// 랜덤 인물 프로필 집계.
#[utoipa::path(
    get,
    path = "/api/user-data",
    responses(
        (status = 200, description = "집계 성공", body = UserDataResponse),
        (status = 500, description = "외부 API 호출 실패", body = UserDataFailure)
    ),
    tag = "profile"
)]
pub async fn get_user_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserDataResponse>, UserDataFailure> {
    match state.aggregator.aggregate().await {
        Ok(profile) => {
            info!(
                country = %profile.country.name,
                currency = %profile.country.currency_code,
                articles = profile.news.len(),
                "Profile aggregated"
            );
            Ok(Json(profile.into()))
        }
        Err(e) => {
            error!(stage = %e.stage(), error = %e, "Error fetching data");
            Err(e.into())
        }
    }
}

/// 프로필 라우터 생성.
pub fn user_data_router() -> Router<Arc<AppState>> {
    Router::new().route("/api/user-data", get(get_user_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::state::create_test_state;

    #[tokio::test]
    async fn test_user_data_success_shape() {
        let app = user_data_router().with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/user-data")
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

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["user"]["firstName"], "Louise");
        assert_eq!(json["data"]["user"]["dateOfBirth"], "7/20/1993");
        assert_eq!(json["data"]["country"]["currencyCode"], "EUR");
        assert_eq!(json["data"]["country"]["currency"], "EUR (Euro)");
        assert_eq!(json["data"]["exchangeRates"]["baseCurrency"], "EUR");
        assert_eq!(json["data"]["exchangeRates"]["USD"], "1.08");
        assert_eq!(json["data"]["exchangeRates"]["KZT"], "512.46");
        assert_eq!(
            json["data"]["news"][0]["description"],
            "No description available"
        );
        assert_eq!(json["data"]["news"][0]["image"], "");
    }
}
