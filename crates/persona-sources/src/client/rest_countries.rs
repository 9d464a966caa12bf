//! restcountries.com 클라이언트.

use async_trait::async_trait;
use persona_core::CountryInfo;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::{endpoint, ErrorBody, UpstreamClient};
use crate::traits::{CountrySource, SourceResult};
use crate::SourceError;

const NAME: &str = "restcountries";

// ============================================================================
// 응답 타입
// ============================================================================

#[derive(Debug, Deserialize)]
struct CountryRecord {
    name: CountryName,
    #[serde(default)]
    capital: Vec<String>,
    /// 언어 코드 → 언어 이름 (응답 순서 유지)
    languages: Option<Map<String, Value>>,
    /// 통화 코드 → { name, symbol } (응답 순서 유지)
    currencies: Option<Map<String, Value>>,
    flags: CountryFlags,
}

#[derive(Debug, Deserialize)]
struct CountryName {
    common: String,
}

#[derive(Debug, Deserialize)]
struct CountryFlags {
    png: String,
}

/// 조회 실패 시 `{"status": 404, "message": "Not Found"}` 형식.
#[derive(Debug, Deserialize)]
struct RestCountriesError {
    message: Option<String>,
}

impl ErrorBody for RestCountriesError {
    fn into_message(self) -> Option<String> {
        self.message
    }
}

impl TryFrom<CountryRecord> for CountryInfo {
    type Error = SourceError;

    fn try_from(record: CountryRecord) -> Result<Self, Self::Error> {
        let languages: Vec<String> = record
            .languages
            .ok_or(SourceError::MissingField("languages"))?
            .values()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();

        let (currency_code, currency) = record
            .currencies
            .ok_or(SourceError::MissingField("currencies"))?
            .into_iter()
            .next()
            .ok_or(SourceError::MissingField("currencies"))?;

        let currency_name = currency
            .get("name")
            .and_then(Value::as_str)
            .ok_or(SourceError::MissingField("currencies.name"))?;

        Ok(CountryInfo::new(
            record.name.common,
            &record.capital,
            &languages,
            currency_code,
            currency_name,
            record.flags.png,
        ))
    }
}

// ============================================================================
// 클라이언트
// ============================================================================

/// restcountries.com v3.1 국가 소스.
#[derive(Clone)]
pub struct RestCountriesClient {
    http: UpstreamClient,
    base_url: String,
}

impl RestCountriesClient {
    /// 새 클라이언트 생성.
    pub fn new(http: UpstreamClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    fn name(&self) -> &str {
        NAME
    }

    async fn lookup(&self, country: &str) -> SourceResult<CountryInfo> {
        let mut url = endpoint(&self.base_url, &["v3.1", "name", country])?;
        url.query_pairs_mut().append_pair("fullText", "true");

        let records: Vec<CountryRecord> = self
            .http
            .get_json::<_, RestCountriesError>(NAME, url)
            .await?;

        let matched = records.len();
        let record = records
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::NotFound(country.to_string()))?;

        let info = CountryInfo::try_from(record)?;
        debug!(
            country,
            matched,
            currency = %info.currency_code,
            "Resolved country"
        );

        Ok(info)
    }
}
