//! 국가 메타데이터.

use serde::{Deserialize, Serialize};

use super::NOT_AVAILABLE;

/// 국가 조회 결과에서 추출한 국가 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CountryInfo {
    /// 일반 명칭 (common name)
    pub name: String,
    /// 수도 (없으면 "N/A")
    pub capital: String,
    /// 사용 언어 목록 (", "로 연결)
    pub languages: String,
    /// 통화 표시 라벨 ("{코드} ({이름})")
    pub currency: String,
    /// 통화 코드 (통화 맵의 첫 번째 키, 3단계의 기준 통화)
    pub currency_code: String,
    /// 통화 표시 이름
    pub currency_name: String,
    /// 국기 이미지 URL (PNG)
    pub flag: String,
}

impl CountryInfo {
    /// 국가 정보를 생성합니다.
    ///
    /// 수도 목록의 첫 번째 항목만 사용하며, 비어 있으면 "N/A"로 대체합니다.
    pub fn new(
        name: impl Into<String>,
        capitals: &[String],
        languages: &[String],
        currency_code: impl Into<String>,
        currency_name: impl Into<String>,
        flag: impl Into<String>,
    ) -> Self {
        let currency_code = currency_code.into();
        let currency_name = currency_name.into();

        Self {
            name: name.into(),
            capital: capitals
                .first()
                .cloned()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            languages: languages.join(", "),
            currency: currency_label(&currency_code, &currency_name),
            currency_code,
            currency_name,
            flag: flag.into(),
        }
    }
}

/// 통화 표시 라벨 ("EUR (Euro)").
pub fn currency_label(code: &str, name: &str) -> String {
    format!("{} ({})", code, name)
}
