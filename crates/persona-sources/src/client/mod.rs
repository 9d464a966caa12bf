//! 외부 API HTTP 클라이언트.
//!
//! 네 개의 클라이언트는 하나의 [`UpstreamClient`](커넥션 풀)를 공유합니다.

mod exchange_rate;
mod news_api;
mod random_user;
mod rest_countries;

pub use exchange_rate::ExchangeRateClient;
pub use news_api::NewsApiClient;
pub use random_user::RandomUserClient;
pub use rest_countries::RestCountriesClient;

use persona_core::UpstreamConfig;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use crate::traits::{CountrySource, NewsSource, PersonSource, RateSource, SourceResult};
use crate::SourceError;

/// 외부 API의 에러 응답 본문.
pub(crate) trait ErrorBody: DeserializeOwned {
    /// 본문에서 사람이 읽을 수 있는 메시지를 추출합니다.
    fn into_message(self) -> Option<String>;
}

/// 공유 HTTP 클라이언트.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    /// 호출당 타임아웃을 지정하여 생성.
    pub fn new(timeout: Duration) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("persona/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { client })
    }

    /// GET 요청 후 JSON 응답을 역직렬화합니다.
    ///
    /// 2xx가 아니면 에러 본문 `E`에서 메시지를 찾아 [`SourceError::Upstream`]으로,
    /// 찾지 못하면 [`SourceError::Http`]로 변환합니다.
    pub(crate) async fn get_json<T, E>(&self, upstream: &'static str, url: Url) -> SourceResult<T>
    where
        T: DeserializeOwned,
        E: ErrorBody,
    {
        // URL에 API 키가 포함될 수 있으므로 호스트만 기록
        debug!(
            upstream,
            host = url.host_str().unwrap_or_default(),
            "GET upstream"
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| {
                error!(upstream, error = %e, "Failed to parse upstream response");
                SourceError::Parse(e.to_string())
            })
        } else {
            match serde_json::from_str::<E>(&body)
                .ok()
                .and_then(ErrorBody::into_message)
            {
                Some(message) => Err(SourceError::Upstream { upstream, message }),
                None => Err(SourceError::Http {
                    status: status.as_u16(),
                    body,
                }),
            }
        }
    }
}

/// 기본 URL 뒤에 경로 세그먼트를 붙입니다.
///
/// 각 세그먼트는 퍼센트 인코딩되므로 공백이나 `/`가 포함된 값도 하나의 세그먼트로 유지됩니다.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> SourceResult<Url> {
    let mut url =
        Url::parse(base).map_err(|e| SourceError::InvalidUrl(format!("{}: {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| SourceError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// 설정에서 구성한 네 개의 HTTP 소스.
#[derive(Clone)]
pub struct HttpSources {
    /// 1단계 소스
    pub persons: Arc<dyn PersonSource>,
    /// 2단계 소스
    pub countries: Arc<dyn CountrySource>,
    /// 3단계 소스
    pub rates: Arc<dyn RateSource>,
    /// 4단계 소스
    pub news: Arc<dyn NewsSource>,
}

impl HttpSources {
    /// 외부 API 설정으로 모든 클라이언트를 생성합니다.
    pub fn from_config(config: &UpstreamConfig) -> SourceResult<Self> {
        let http = UpstreamClient::new(Duration::from_secs(config.timeout_secs))?;

        Ok(Self {
            persons: Arc::new(RandomUserClient::new(
                http.clone(),
                &config.random_user_url,
            )),
            countries: Arc::new(RestCountriesClient::new(
                http.clone(),
                &config.countries_url,
            )),
            rates: Arc::new(ExchangeRateClient::new(
                http.clone(),
                &config.exchange_rate_url,
                config.exchange_rate_api_key.clone(),
            )),
            news: Arc::new(NewsApiClient::new(
                http,
                &config.news_url,
                config.news_api_key.clone(),
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_segments() {
        let url = endpoint("https://randomuser.me", &["api", ""]).unwrap();
        assert_eq!(url.as_str(), "https://randomuser.me/api/");

        let url = endpoint("http://127.0.0.1:1234/", &["v3.1", "name", "France"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:1234/v3.1/name/France");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = endpoint("https://restcountries.com", &["v3.1", "name", "New Zealand"]).unwrap();
        assert_eq!(url.path(), "/v3.1/name/New%20Zealand");

        let url = endpoint("https://example.com", &["a/b"]).unwrap();
        assert_eq!(url.path(), "/a%2Fb");
    }

    #[test]
    fn test_endpoint_rejects_invalid_base() {
        assert!(matches!(
            endpoint("not a url", &["x"]),
            Err(SourceError::InvalidUrl(_))
        ));
        assert!(matches!(
            endpoint("mailto:someone@example.com", &["x"]),
            Err(SourceError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_http_sources_from_default_config() {
        let sources = HttpSources::from_config(&UpstreamConfig::default()).unwrap();
        assert!(!sources.rates.is_configured());
        assert!(!sources.news.is_configured());
        assert_eq!(sources.persons.name(), "randomuser");
    }
}
