//! `/api/user-data` 통합 테스트.
//!
//! 실제 HTTP 클라이언트를 하나의 mockito 서버에 연결하여 네 단계 체인 전체를 검증합니다.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mockito::{Matcher, Mock, Server, ServerGuard};
use persona_api::{create_api_router, AppState, ProfileAggregator, USER_DATA_FAILURE_MESSAGE};
use persona_core::UpstreamConfig;
use persona_sources::HttpSources;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

const PERSON_BODY: &str = r#"{
    "results": [{
        "gender": "male",
        "name": { "first": "Arman", "last": "Seitkali" },
        "location": {
            "street": { "number": 17, "name": "Abay Avenue" },
            "city": "Almaty",
            "country": "Kazakhstan"
        },
        "dob": { "date": "1988-03-05T04:12:00.000Z", "age": 36 },
        "picture": { "large": "https://randomuser.me/api/portraits/men/7.jpg" }
    }]
}"#;

const COUNTRY_BODY: &str = r#"[{
    "name": { "common": "Kazakhstan" },
    "capital": ["Astana"],
    "languages": { "kaz": "Kazakh", "rus": "Russian" },
    "currencies": { "KZT": { "name": "Kazakhstani tenge", "symbol": "₸" } },
    "flags": { "png": "https://flagcdn.com/w320/kz.png" }
}]"#;

const RATES_BODY: &str = r#"{
    "result": "success",
    "base_code": "KZT",
    "conversion_rates": { "KZT": 1, "USD": 0.00209, "EUR": 0.00193 }
}"#;

const NEWS_BODY: &str = r#"{
    "status": "ok",
    "totalResults": 2,
    "articles": [
        {
            "source": { "id": null, "name": "Astana Times" },
            "title": "<script>alert('x')</script> Steppe forum opens",
            "description": null,
            "url": "https://astanatimes.com/forum",
            "urlToImage": null
        },
        {
            "source": { "id": null, "name": "Reuters" },
            "title": "Tenge steadies",
            "description": "Currency markets calm",
            "url": "https://reuters.com/tenge",
            "urlToImage": "https://reuters.com/tenge.jpg"
        }
    ]
}"#;

/// 체인 단계 순서 (실패 위치 지정용).
const PERSON: usize = 0;
const COUNTRY: usize = 1;
const RATES: usize = 2;
const NEWS: usize = 3;

/// 네 개의 외부 API를 모킹합니다.
///
/// `fail_at` 단계는 500을 반환하고, 그 이후 단계는 호출되지 않아야 합니다.
async fn mock_upstreams(server: &mut ServerGuard, fail_at: Option<usize>) -> Vec<Mock> {
    let specs: [(&str, Option<Matcher>, &str); 4] = [
        ("/api/", None, PERSON_BODY),
        (
            "/v3.1/name/Kazakhstan",
            Some(Matcher::UrlEncoded("fullText".into(), "true".into())),
            COUNTRY_BODY,
        ),
        ("/v6/rates-key/latest/KZT", None, RATES_BODY),
        (
            "/v2/everything",
            Some(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "Kazakhstan".into()),
                Matcher::UrlEncoded("apiKey".into(), "news-key".into()),
            ])),
            NEWS_BODY,
        ),
    ];

    let mut mocks = Vec::new();
    for (stage, (path, query, body)) in specs.into_iter().enumerate() {
        let mut mock = server.mock("GET", path);
        if let Some(query) = query {
            mock = mock.match_query(query);
        }

        mock = match fail_at {
            Some(failed) if stage == failed => mock.with_status(500).with_body("upstream down"),
            Some(failed) if stage > failed => mock.with_status(200).with_body(body).expect(0),
            _ => mock
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(body),
        };

        mocks.push(mock.create_async().await);
    }
    mocks
}

fn app_for(server: &ServerGuard, with_keys: bool) -> Router {
    let key = |value: &str| with_keys.then(|| SecretString::from(value.to_string()));
    let config = UpstreamConfig {
        random_user_url: server.url(),
        countries_url: server.url(),
        exchange_rate_url: server.url(),
        news_url: server.url(),
        timeout_secs: 5,
        exchange_rate_api_key: key("rates-key"),
        news_api_key: key("news-key"),
    };

    let sources = HttpSources::from_config(&config).unwrap();
    let state = Arc::new(AppState::new(ProfileAggregator::from(sources)));
    create_api_router().with_state(state)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_user_data_full_chain() {
    let mut server = Server::new_async().await;
    let mocks = mock_upstreams(&mut server, None).await;

    let (status, json) = get_json(app_for(&server, true), "/api/user-data").await;

    for mock in &mocks {
        mock.assert_async().await;
    }
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let data = &json["data"];
    assert_eq!(data["user"]["firstName"], "Arman");
    assert_eq!(data["user"]["address"], "17 Abay Avenue");
    assert_eq!(data["user"]["dateOfBirth"], "3/5/1988");
    assert_eq!(data["user"]["age"], 36);

    assert_eq!(data["country"]["name"], "Kazakhstan");
    assert_eq!(data["country"]["languages"], "Kazakh, Russian");
    assert_eq!(data["country"]["currency"], "KZT (Kazakhstani tenge)");

    assert_eq!(data["exchangeRates"]["baseCurrency"], "KZT");
    assert_eq!(data["exchangeRates"]["USD"], "0.00");
    assert_eq!(data["exchangeRates"]["KZT"], "1.00");

    let news = data["news"].as_array().unwrap();
    assert_eq!(news.len(), 2);
    assert_eq!(news[0]["description"], "No description available");
    assert_eq!(news[0]["image"], "");
    assert_eq!(news[1]["source"], "Reuters");

    // 서버는 원문을 그대로 전달하고, 이스케이프는 페이지 스크립트가 담당
    assert_eq!(
        news[0]["title"],
        "<script>alert('x')</script> Steppe forum opens"
    );
}

#[tokio::test]
async fn test_any_failing_stage_yields_uniform_500() {
    for failed in [PERSON, COUNTRY, RATES, NEWS] {
        let mut server = Server::new_async().await;
        let mocks = mock_upstreams(&mut server, Some(failed)).await;

        let (status, json) = get_json(app_for(&server, true), "/api/user-data").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "stage {}", failed);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], USER_DATA_FAILURE_MESSAGE);
        assert_eq!(json["error"], "Request failed with status code 500");
        assert!(json.get("data").is_none());

        // 실패 이후 단계는 호출되지 않음
        for mock in &mocks[failed + 1..] {
            mock.assert_async().await;
        }
    }
}

#[tokio::test]
async fn test_missing_api_keys_fail_the_chain() {
    let mut server = Server::new_async().await;
    mock_upstreams(&mut server, Some(RATES)).await;

    let (status, json) = get_json(app_for(&server, false), "/api/user-data").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "API key not configured for exchangerate");
}

#[tokio::test]
async fn test_page_and_assets_are_served() {
    let server = Server::new_async().await;
    let app = app_for(&server, true);

    for (uri, content_type) in [
        ("/", "text/html"),
        ("/script.js", "text/javascript"),
        ("/style.css", "text/css"),
    ] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let header = response.headers()["content-type"].to_str().unwrap();
        assert!(header.starts_with(content_type), "{} -> {}", uri, header);
    }
}
