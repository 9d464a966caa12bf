//! 인물 정보.

use chrono::{DateTime, Datelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 랜덤 인물 레코드에서 추출한 인물 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// 이름
    pub first_name: String,
    /// 성
    pub last_name: String,
    /// 성별 ("male" | "female")
    pub gender: String,
    /// 프로필 사진 URL (large)
    pub picture: String,
    /// 나이
    pub age: u32,
    /// 생년월일 (M/D/YYYY)
    pub date_of_birth: String,
    /// 도시
    pub city: String,
    /// 국가명 (2, 4단계의 조회 키)
    pub country: String,
    /// 도로명 주소 ("{번지} {도로명}")
    pub address: String,
}

/// 번지와 도로명을 하나의 주소 문자열로 합칩니다.
pub fn compose_address(street_number: impl fmt::Display, street_name: &str) -> String {
    format!("{} {}", street_number, street_name)
}

/// RFC 3339 타임스탬프를 로케일 날짜 문자열(M/D/YYYY)로 변환합니다.
///
/// 원본 오프셋 기준의 날짜를 사용합니다. 파싱할 수 없으면 `None`.
pub fn locale_date(raw: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(raw).ok()?;
    Some(format!(
        "{}/{}/{}",
        parsed.month(),
        parsed.day(),
        parsed.year()
    ))
}
