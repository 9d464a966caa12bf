//! exchangerate-api.com v6 클라이언트.

use std::collections::HashMap;

use async_trait::async_trait;
use persona_core::{ExchangeRates, EXCHANGE_RATE_API_KEY_ENV, TARGET_CURRENCIES};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{endpoint, ErrorBody, UpstreamClient};
use crate::traits::{RateSource, SourceResult};
use crate::SourceError;

const NAME: &str = "exchangerate";

// ============================================================================
// 응답 타입
// ============================================================================

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    /// 통화 코드 → 환율. 값이 null인 경우도 허용.
    conversion_rates: Option<HashMap<String, Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct ExchangeRateError {
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

impl ErrorBody for ExchangeRateError {
    fn into_message(self) -> Option<String> {
        self.error_type
    }
}

// ============================================================================
// 클라이언트
// ============================================================================

/// exchangerate-api.com 환율 소스.
///
/// API 키가 경로에 포함되므로 키가 없으면 요청을 보내지 않고 실패합니다.
#[derive(Clone)]
pub struct ExchangeRateClient {
    http: UpstreamClient,
    base_url: String,
    api_key: Option<SecretString>,
}

impl ExchangeRateClient {
    /// 새 클라이언트 생성.
    pub fn new(
        http: UpstreamClient,
        base_url: impl Into<String>,
        api_key: Option<SecretString>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl RateSource for ExchangeRateClient {
    fn name(&self) -> &str {
        NAME
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn latest(&self, base_currency: &str) -> SourceResult<ExchangeRates> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            warn!("{} is not set", EXCHANGE_RATE_API_KEY_ENV);
            SourceError::MissingApiKey(NAME)
        })?;

        let url = endpoint(
            &self.base_url,
            &["v6", api_key.expose_secret(), "latest", base_currency],
        )?;

        let response: LatestRatesResponse = self
            .http
            .get_json::<_, ExchangeRateError>(NAME, url)
            .await?;

        if response.result.as_deref() == Some("error") {
            return Err(SourceError::Upstream {
                upstream: NAME,
                message: response
                    .error_type
                    .unwrap_or_else(|| "unknown-error".to_string()),
            });
        }

        let rates = response
            .conversion_rates
            .ok_or(SourceError::MissingField("conversion_rates"))?;

        let [usd, kzt] = TARGET_CURRENCIES.map(|code| rates.get(code).copied().flatten());
        let exchange_rates = ExchangeRates::new(base_currency, usd, kzt);

        debug!(
            base = base_currency,
            usd = %exchange_rates.usd,
            kzt = %exchange_rates.kzt,
            "Fetched exchange rates"
        );

        Ok(exchange_rates)
    }
}
