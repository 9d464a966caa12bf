//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//!
//! # 설정 우선순위
//!
//! 1. 코드에 정의된 기본값
//! 2. 설정 파일 (`config/default.toml`, 선택)
//! 3. `PERSONA__` 접두사 환경 변수 (예: `PERSONA__SERVER__PORT=8080`)
//! 4. 잘 알려진 시크릿 환경 변수: `EXCHANGE_RATE_API_KEY`, `NEWS_API_KEY`

use secrecy::SecretString;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::error::Stage;

/// 업스트림 체인 최대 소요 시간에 더하는 여유분 (초).
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 5;

/// 환율 API 키 환경 변수 이름.
pub const EXCHANGE_RATE_API_KEY_ENV: &str = "EXCHANGE_RATE_API_KEY";

/// 뉴스 API 키 환경 변수 이름.
pub const NEWS_API_KEY_ENV: &str = "NEWS_API_KEY";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 외부 API 설정
    pub upstream: UpstreamConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 전체 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: 60,
        }
    }
}

impl ServerConfig {
    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// 외부 API 설정.
///
/// 기본 URL은 테스트에서 목 서버로 교체할 수 있도록 설정 가능합니다.
/// `Debug` 출력에서 API 키는 마스킹됩니다.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// 랜덤 인물 API 기본 URL
    pub random_user_url: String,
    /// 국가 조회 API 기본 URL
    pub countries_url: String,
    /// 환율 API 기본 URL
    pub exchange_rate_url: String,
    /// 뉴스 검색 API 기본 URL
    pub news_url: String,
    /// 외부 호출당 타임아웃 (초)
    pub timeout_secs: u64,
    /// 환율 API 키
    #[serde(default)]
    pub exchange_rate_api_key: Option<SecretString>,
    /// 뉴스 API 키
    #[serde(default)]
    pub news_api_key: Option<SecretString>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            random_user_url: "https://randomuser.me".to_string(),
            countries_url: "https://restcountries.com".to_string(),
            exchange_rate_url: "https://v6.exchangerate-api.com".to_string(),
            news_url: "https://newsapi.org".to_string(),
            timeout_secs: 10,
            exchange_rate_api_key: None,
            news_api_key: None,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// 서버 전체 요청 타임아웃.
    ///
    /// 네 단계가 모두 호출당 타임아웃까지 걸려도 균일한 500 응답이 먼저 나가도록,
    /// `server.request_timeout_secs`와 (단계 수 × `upstream.timeout_secs` + 여유분) 중
    /// 큰 값을 사용합니다.
    pub fn request_timeout(&self) -> Duration {
        let chain_secs = self
            .upstream
            .timeout_secs
            .saturating_mul(Stage::ALL.len() as u64)
            .saturating_add(REQUEST_TIMEOUT_MARGIN_SECS);

        Duration::from_secs(self.server.request_timeout_secs.max(chain_secs))
    }

    /// 파일과 프로세스 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }

    /// 파일과 주어진 환경 변수 맵에서 설정을 로드합니다.
    ///
    /// 프로세스 환경을 건드리지 않고 설정을 구성할 수 있습니다.
    pub fn load_with_env<P: AsRef<Path>>(
        path: P,
        env: config::Map<String, String>,
    ) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let secret = |name: &str| env.get(name).filter(|v| !v.is_empty()).cloned();
        let exchange_rate_api_key = secret(EXCHANGE_RATE_API_KEY_ENV);
        let news_api_key = secret(NEWS_API_KEY_ENV);

        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port)?
            .set_default(
                "server.request_timeout_secs",
                defaults.server.request_timeout_secs,
            )?
            .set_default("upstream.random_user_url", defaults.upstream.random_user_url)?
            .set_default("upstream.countries_url", defaults.upstream.countries_url)?
            .set_default(
                "upstream.exchange_rate_url",
                defaults.upstream.exchange_rate_url,
            )?
            .set_default("upstream.news_url", defaults.upstream.news_url)?
            .set_default("upstream.timeout_secs", defaults.upstream.timeout_secs)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            // 파일에서 로드 (없어도 됨)
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("PERSONA")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env)),
            )
            // 시크릿은 접두사 없는 이름으로 제공됨
            .set_override_option("upstream.exchange_rate_api_key", exchange_rate_api_key)?
            .set_override_option("upstream.news_api_key", news_api_key)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
