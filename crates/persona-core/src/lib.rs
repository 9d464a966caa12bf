//! # Persona Core
//!
//! 프로필 집계 서비스의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 워크스페이스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 인물, 국가, 환율, 뉴스 도메인 모델
//! - 집계 결과(CompositeProfile) 구조체
//! - 집계 에러 타입
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
