//! 집계 체인의 에러 타입.
//!
//! 네 단계 중 어느 단계에서 실패하든 하나의 에러 종류("aggregation failed")로
//! 수렴합니다. 어느 단계에서 실패했는지는 로깅용으로만 보존되며,
//! 클라이언트에는 원본 에러 메시지만 전달됩니다.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// 집계 체인의 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// 1단계: 랜덤 인물 조회
    Person,
    /// 2단계: 국가 메타데이터 조회
    Country,
    /// 3단계: 환율 조회
    Rates,
    /// 4단계: 뉴스 검색
    News,
}

impl Stage {
    /// 실행 순서대로 정렬된 전체 단계.
    pub const ALL: [Stage; 4] = [Stage::Person, Stage::Country, Stage::Rates, Stage::News];

    /// 로그/메트릭 라벨용 문자열.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Person => "person",
            Stage::Country => "country",
            Stage::Rates => "rates",
            Stage::News => "news",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 집계 실패.
///
/// `Display`는 실패한 단계의 원본 에러 메시지만 출력합니다.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// 인물 조회 실패
    #[error("{0}")]
    Person(String),

    /// 국가 조회 실패
    #[error("{0}")]
    Country(String),

    /// 환율 조회 실패
    #[error("{0}")]
    Rates(String),

    /// 뉴스 검색 실패
    #[error("{0}")]
    News(String),
}

/// 집계 작업을 위한 Result 타입.
pub type AggregationResult<T> = Result<T, AggregationError>;

impl AggregationError {
    /// 주어진 단계의 에러를 생성합니다.
    pub fn at(stage: Stage, cause: impl fmt::Display) -> Self {
        let message = cause.to_string();
        match stage {
            Stage::Person => AggregationError::Person(message),
            Stage::Country => AggregationError::Country(message),
            Stage::Rates => AggregationError::Rates(message),
            Stage::News => AggregationError::News(message),
        }
    }

    /// 실패한 단계.
    pub fn stage(&self) -> Stage {
        match self {
            AggregationError::Person(_) => Stage::Person,
            AggregationError::Country(_) => Stage::Country,
            AggregationError::Rates(_) => Stage::Rates,
            AggregationError::News(_) => Stage::News,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_underlying_message() {
        let err = AggregationError::at(Stage::Rates, "HTTP 403: invalid-key");
        assert_eq!(err.to_string(), "HTTP 403: invalid-key");
        assert_eq!(err.stage(), Stage::Rates);
    }

    #[test]
    fn test_stage_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(AggregationError::at(stage, "x").stage(), stage);
        }
        assert_eq!(Stage::News.to_string(), "news");
    }
}
