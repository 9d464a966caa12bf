//! newsapi.org v2 클라이언트.

use async_trait::async_trait;
use persona_core::{NewsArticle, MAX_NEWS_ARTICLES, NEWS_API_KEY_ENV};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{endpoint, ErrorBody, UpstreamClient};
use crate::traits::{NewsSource, SourceResult};
use crate::SourceError;

const NAME: &str = "newsapi";

// ============================================================================
// 응답 타입
// ============================================================================

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: Option<String>,
    message: Option<String>,
    articles: Option<Vec<ArticleRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticleRecord {
    title: Option<String>,
    description: Option<String>,
    url_to_image: Option<String>,
    url: Option<String>,
    source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

/// `{"status": "error", "code": "...", "message": "..."}` 형식.
#[derive(Debug, Deserialize)]
struct NewsApiError {
    code: Option<String>,
    message: Option<String>,
}

impl ErrorBody for NewsApiError {
    fn into_message(self) -> Option<String> {
        self.message.or(self.code)
    }
}

impl From<ArticleRecord> for NewsArticle {
    fn from(record: ArticleRecord) -> Self {
        NewsArticle::new(
            record.title,
            record.description,
            record.url_to_image,
            record.url,
            record.source.and_then(|s| s.name),
        )
    }
}

// ============================================================================
// 클라이언트
// ============================================================================

/// newsapi.org `everything` 검색 소스.
#[derive(Clone)]
pub struct NewsApiClient {
    http: UpstreamClient,
    base_url: String,
    api_key: Option<SecretString>,
}

impl NewsApiClient {
    /// 새 클라이언트 생성.
    pub fn new(
        http: UpstreamClient,
        base_url: impl Into<String>,
        api_key: Option<SecretString>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    fn name(&self) -> &str {
        NAME
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<NewsArticle>> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            warn!("{} is not set", NEWS_API_KEY_ENV);
            SourceError::MissingApiKey(NAME)
        })?;

        let mut url = endpoint(&self.base_url, &["v2", "everything"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("language", "en")
            .append_pair("pageSize", &MAX_NEWS_ARTICLES.to_string())
            .append_pair("sortBy", "publishedAt")
            .append_pair("apiKey", api_key.expose_secret());

        let response: EverythingResponse =
            self.http.get_json::<_, NewsApiError>(NAME, url).await?;

        if response.status.as_deref() == Some("error") {
            return Err(SourceError::Upstream {
                upstream: NAME,
                message: response
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        let articles: Vec<NewsArticle> = response
            .articles
            .ok_or(SourceError::MissingField("articles"))?
            .into_iter()
            .take(MAX_NEWS_ARTICLES)
            .map(NewsArticle::from)
            .collect();

        debug!(query, count = articles.len(), "Fetched news articles");

        Ok(articles)
    }
}
