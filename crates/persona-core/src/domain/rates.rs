//! 환율 정보.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::NOT_AVAILABLE;

/// 기준 통화 대비 조회하는 대상 통화 (`ExchangeRates::new`의 인자 순서).
pub const TARGET_CURRENCIES: [&str; 2] = ["USD", "KZT"];

/// 기준 통화의 환율 요약.
///
/// 각 환율은 소수점 둘째 자리까지의 문자열이거나, 값이 없으면 "N/A"입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct ExchangeRates {
    /// 기준 통화 코드
    #[serde(rename = "baseCurrency")]
    pub base_currency: String,
    /// 1 기준 통화당 USD
    #[serde(rename = "USD")]
    pub usd: String,
    /// 1 기준 통화당 KZT
    #[serde(rename = "KZT")]
    pub kzt: String,
}

impl ExchangeRates {
    /// 원시 환율 값으로부터 생성합니다.
    pub fn new(base_currency: impl Into<String>, usd: Option<f64>, kzt: Option<f64>) -> Self {
        Self {
            base_currency: base_currency.into(),
            usd: format_rate(usd),
            kzt: format_rate(kzt),
        }
    }
}

/// 환율을 소수점 둘째 자리 문자열로 포맷합니다.
///
/// 값이 없거나 0이거나 유한하지 않으면 "N/A"를 반환합니다.
/// f64의 정확한 이진 값을 기준으로 0에서 먼 쪽(half away from zero)으로 반올림합니다.
/// 따라서 `1.005`처럼 이진 표현이 중간값보다 약간 작은 값은 내림됩니다.
pub fn format_rate(rate: Option<f64>) -> String {
    rate.filter(|r| r.is_finite() && *r != 0.0)
        .and_then(Decimal::from_f64_retain)
        .map(|d| {
            format!(
                "{:.2}",
                d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            )
        })
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
