//! 애플리케이션 상태 관리.
//!
//! 모든 핸들러에서 공유되는 애플리케이션 상태를 정의합니다.
//! 상태는 생성 후 변경되지 않으며 `Arc<AppState>`로 공유됩니다.

use chrono::{DateTime, Utc};

use crate::aggregator::ProfileAggregator;

/// 모든 핸들러에서 공유되는 애플리케이션 상태.
#[derive(Clone)]
pub struct AppState {
    /// 프로필 집계기
    pub aggregator: ProfileAggregator,

    /// 서버 시작 시간
    pub started_at: DateTime<Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(aggregator: ProfileAggregator) -> Self {
        Self {
            aggregator,
            started_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        Utc::now().signed_duration_since(self.started_at).num_seconds()
    }
}

/// 테스트용 AppState 생성.
///
/// 고정된 응답을 돌려주는 스텁 소스를 사용하며 네트워크에 접근하지 않습니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    AppState::new(test_sources::StubSources::new().aggregator())
}

/// 고정 응답 스텁 소스.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_sources {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use persona_core::{CountryInfo, ExchangeRates, NewsArticle, Person, Stage};
    use persona_sources::{
        CountrySource, NewsSource, PersonSource, RateSource, SourceError, SourceResult,
    };

    use crate::aggregator::ProfileAggregator;

    /// 네 개의 소스 trait을 모두 구현하는 스텁.
    ///
    /// 호출 순서와 인자를 기록하며, 지정한 단계에서 503 에러를 반환할 수 있습니다.
    #[derive(Clone, Default)]
    pub struct StubSources {
        fail_at: Option<Stage>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl StubSources {
        /// 모든 단계가 성공하는 스텁.
        pub fn new() -> Self {
            Self::default()
        }

        /// `stage`에서 실패하는 스텁.
        pub fn failing_at(stage: Stage) -> Self {
            Self {
                fail_at: Some(stage),
                ..Self::default()
            }
        }

        /// 이 스텁을 네 단계 모두에 사용하는 집계기.
        pub fn aggregator(&self) -> ProfileAggregator {
            let stub = Arc::new(self.clone());
            ProfileAggregator::new(stub.clone(), stub.clone(), stub.clone(), stub)
        }

        /// 지금까지 기록된 호출 목록.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }

        fn enter(&self, stage: Stage, call: String) -> SourceResult<()> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }

            if self.fail_at == Some(stage) {
                return Err(SourceError::Http {
                    status: 503,
                    body: format!("{} unavailable", stage),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PersonSource for StubSources {
        fn name(&self) -> &str {
            "stub"
        }

        async fn fetch_person(&self) -> SourceResult<Person> {
            self.enter(Stage::Person, "person".to_string())?;
            Ok(Person {
                first_name: "Louise".to_string(),
                last_name: "Fabre".to_string(),
                gender: "female".to_string(),
                picture: "https://randomuser.me/api/portraits/women/12.jpg".to_string(),
                age: 31,
                date_of_birth: "7/20/1993".to_string(),
                city: "Lyon".to_string(),
                country: "France".to_string(),
                address: "4242 Rue de la Paix".to_string(),
            })
        }
    }

    #[async_trait]
    impl CountrySource for StubSources {
        fn name(&self) -> &str {
            "stub"
        }

        async fn lookup(&self, country: &str) -> SourceResult<CountryInfo> {
            self.enter(Stage::Country, format!("country:{}", country))?;
            Ok(CountryInfo::new(
                country,
                &["Paris".to_string()],
                &["French".to_string()],
                "EUR",
                "Euro",
                "https://flagcdn.com/w320/fr.png",
            ))
        }
    }

    #[async_trait]
    impl RateSource for StubSources {
        fn name(&self) -> &str {
            "stub"
        }

        async fn latest(&self, base_currency: &str) -> SourceResult<ExchangeRates> {
            self.enter(Stage::Rates, format!("rates:{}", base_currency))?;
            Ok(ExchangeRates::new(base_currency, Some(1.0845), Some(512.456)))
        }
    }

    #[async_trait]
    impl NewsSource for StubSources {
        fn name(&self) -> &str {
            "stub"
        }

        async fn search(&self, query: &str) -> SourceResult<Vec<NewsArticle>> {
            self.enter(Stage::News, format!("news:{}", query))?;
            Ok(vec![
                NewsArticle::new(
                    Some(format!("{} election results", query)),
                    None,
                    None,
                    Some("https://example.com/a".to_string()),
                    Some("Le Monde".to_string()),
                ),
                NewsArticle::new(
                    Some("<script>alert(1)</script>".to_string()),
                    Some("Festival season".to_string()),
                    Some("https://example.com/b.jpg".to_string()),
                    Some("https://example.com/b".to_string()),
                    Some("BBC News".to_string()),
                ),
            ])
        }
    }
}
