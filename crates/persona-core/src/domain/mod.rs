//! 도메인 모델.
//!
//! 네 개의 외부 API에서 추출한 엔티티와 이를 묶은 집계 결과를 정의합니다.
//! 모든 엔티티는 요청 범위에서만 존재하며, 직렬화 후 폐기됩니다.

pub mod country;
pub mod news;
pub mod person;
pub mod profile;
pub mod rates;

pub use country::*;
pub use news::*;
pub use person::*;
pub use profile::*;
pub use rates::*;

/// 값이 없을 때 사용하는 표시 문자열.
pub const NOT_AVAILABLE: &str = "N/A";
