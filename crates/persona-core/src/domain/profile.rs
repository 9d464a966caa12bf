//! 집계 결과.

use serde::{Deserialize, Serialize};

use super::{CountryInfo, ExchangeRates, NewsArticle, Person};

/// 네 단계 집계 체인의 결과.
///
/// 모든 단계가 성공한 경우에만 만들어지며, 부분 결과는 존재하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CompositeProfile {
    /// 1단계: 인물
    pub user: Person,
    /// 2단계: 국가
    pub country: CountryInfo,
    /// 3단계: 환율
    pub exchange_rates: ExchangeRates,
    /// 4단계: 뉴스 (최대 5건)
    pub news: Vec<NewsArticle>,
}
