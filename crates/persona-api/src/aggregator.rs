//! 프로필 집계 파이프라인.
//!
//! 네 개의 외부 소스를 정해진 순서로 호출하고, 각 단계의 출력에서 다음 단계의
//! 입력을 파생합니다. 한 단계라도 실패하면 즉시 중단하며 부분 결과는 없습니다.
//! 재시도나 대체 경로는 두지 않습니다.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use persona_core::{AggregationError, AggregationResult, CompositeProfile, Stage};
use persona_sources::{
    CountrySource, HttpSources, NewsSource, PersonSource, RateSource, SourceResult,
};
use tracing::debug;

use crate::metrics::{record_aggregation, record_upstream_call};

/// 프로필 집계기.
///
/// 요청 간 공유되는 가변 상태가 없으므로 `Arc<AppState>` 안에서 그대로 공유됩니다.
#[derive(Clone)]
pub struct ProfileAggregator {
    persons: Arc<dyn PersonSource>,
    countries: Arc<dyn CountrySource>,
    rates: Arc<dyn RateSource>,
    news: Arc<dyn NewsSource>,
}

impl ProfileAggregator {
    /// 네 개의 소스로 집계기를 생성합니다.
    pub fn new(
        persons: Arc<dyn PersonSource>,
        countries: Arc<dyn CountrySource>,
        rates: Arc<dyn RateSource>,
        news: Arc<dyn NewsSource>,
    ) -> Self {
        Self {
            persons,
            countries,
            rates,
            news,
        }
    }

    /// 인물 소스.
    pub fn person_source(&self) -> &dyn PersonSource {
        self.persons.as_ref()
    }

    /// 국가 소스.
    pub fn country_source(&self) -> &dyn CountrySource {
        self.countries.as_ref()
    }

    /// 환율 소스.
    pub fn rate_source(&self) -> &dyn RateSource {
        self.rates.as_ref()
    }

    /// 뉴스 소스.
    pub fn news_source(&self) -> &dyn NewsSource {
        self.news.as_ref()
    }

    /// 네 단계를 순서대로 실행하여 프로필을 만듭니다.
    ///
    /// ```text
    /// person ─▶ country(person.country) ─▶ rates(country.currency_code)
    ///                                   ─▶ news(person.country)
    /// ```
    pub async fn aggregate(&self) -> AggregationResult<CompositeProfile> {
        let result = self.run_chain().await;

        record_aggregation(match &result {
            Ok(_) => "success",
            Err(e) => e.stage().as_str(),
        });

        result
    }

    async fn run_chain(&self) -> AggregationResult<CompositeProfile> {
        let user = run_stage(
            Stage::Person,
            self.persons.name(),
            self.persons.fetch_person(),
        )
        .await?;

        let country = run_stage(
            Stage::Country,
            self.countries.name(),
            self.countries.lookup(&user.country),
        )
        .await?;

        let exchange_rates = run_stage(
            Stage::Rates,
            self.rates.name(),
            self.rates.latest(&country.currency_code),
        )
        .await?;

        let news = run_stage(
            Stage::News,
            self.news.name(),
            self.news.search(&user.country),
        )
        .await?;

        Ok(CompositeProfile {
            user,
            country,
            exchange_rates,
            news,
        })
    }
}

impl From<HttpSources> for ProfileAggregator {
    fn from(sources: HttpSources) -> Self {
        Self::new(sources.persons, sources.countries, sources.rates, sources.news)
    }
}

/// 한 단계를 실행하고 호출 메트릭을 기록합니다.
async fn run_stage<T, F>(stage: Stage, upstream: &str, call: F) -> AggregationResult<T>
where
    F: Future<Output = SourceResult<T>>,
{
    let start = Instant::now();
    let result = call.await;
    let elapsed = start.elapsed();

    record_upstream_call(upstream, result.is_ok(), elapsed.as_secs_f64());
    debug!(
        stage = %stage,
        upstream,
        ok = result.is_ok(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Stage finished"
    );

    result.map_err(|e| AggregationError::at(stage, e))
}
