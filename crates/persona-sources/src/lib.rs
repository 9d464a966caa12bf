//! 외부 데이터 소스 연결.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 소스 trait: 집계 체인의 각 단계를 위한 통합 인터페이스
//! - randomuser.me 인물 클라이언트
//! - restcountries.com 국가 클라이언트
//! - exchangerate-api.com 환율 클라이언트
//! - newsapi.org 뉴스 클라이언트
//! - 공통 HTTP 요청/응답 처리 및 에러 매핑

pub mod client;
pub mod error;
pub mod traits;

pub use client::{
    ExchangeRateClient, HttpSources, NewsApiClient, RandomUserClient, RestCountriesClient,
    UpstreamClient,
};
pub use error::*;
pub use traits::*;
