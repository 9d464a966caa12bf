//! 데이터 소스 trait 정의.
//!
//! 집계 체인의 각 단계는 하나의 소스 trait에 대응합니다.
//! 각 단계의 입력은 이전 단계의 출력에서 파생됩니다:
//!
//! ```text
//! PersonSource ─(country)─▶ CountrySource ─(currency code)─▶ RateSource
//!      └────────(country)────────────────────────────────▶ NewsSource
//! ```

use async_trait::async_trait;
use persona_core::{CountryInfo, ExchangeRates, NewsArticle, Person};

use crate::SourceError;

/// 소스 작업을 위한 Result 타입.
pub type SourceResult<T> = Result<T, SourceError>;

/// 1단계: 랜덤 인물 소스.
#[async_trait]
pub trait PersonSource: Send + Sync {
    /// 소스 이름 반환.
    fn name(&self) -> &str;

    /// 인물 한 명을 조회합니다.
    async fn fetch_person(&self) -> SourceResult<Person>;
}

/// 2단계: 국가 메타데이터 소스.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// 소스 이름 반환.
    fn name(&self) -> &str;

    /// 국가명(정확히 일치)으로 국가 정보를 조회합니다.
    ///
    /// 여러 건이 일치하면 첫 번째 결과를 사용합니다.
    async fn lookup(&self, country: &str) -> SourceResult<CountryInfo>;
}

/// 3단계: 환율 소스.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// 소스 이름 반환.
    fn name(&self) -> &str;

    /// 호출에 필요한 자격증명이 설정되어 있는지 확인.
    fn is_configured(&self) -> bool {
        true
    }

    /// 기준 통화의 최신 환율을 조회합니다.
    async fn latest(&self, base_currency: &str) -> SourceResult<ExchangeRates>;
}

/// 4단계: 뉴스 검색 소스.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// 소스 이름 반환.
    fn name(&self) -> &str;

    /// 호출에 필요한 자격증명이 설정되어 있는지 확인.
    fn is_configured(&self) -> bool {
        true
    }

    /// 검색어로 최신 영어 기사를 최대 5건 조회합니다.
    async fn search(&self, query: &str) -> SourceResult<Vec<NewsArticle>>;
}
