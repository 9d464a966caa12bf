//! 뉴스 기사.

use serde::{Deserialize, Serialize};

/// 한 번에 반환하는 최대 기사 수.
pub const MAX_NEWS_ARTICLES: usize = 5;

/// 설명이 없는 기사에 사용하는 대체 문구.
pub const NO_DESCRIPTION: &str = "No description available";

/// 뉴스 검색 결과에서 추출한 기사.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct NewsArticle {
    /// 제목
    pub title: String,
    /// 설명 (없으면 대체 문구)
    pub description: String,
    /// 대표 이미지 URL (없으면 빈 문자열)
    pub image: String,
    /// 기사 URL
    pub url: String,
    /// 출처 이름
    pub source: String,
}

impl NewsArticle {
    /// 선택적 필드로부터 기사를 생성합니다.
    ///
    /// 비어 있거나 없는 설명은 [`NO_DESCRIPTION`]으로, 없는 이미지는 빈 문자열로 대체합니다.
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        image: Option<String>,
        url: Option<String>,
        source: Option<String>,
    ) -> Self {
        Self {
            title: title.unwrap_or_default(),
            description: description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            image: image.unwrap_or_default(),
            url: url.unwrap_or_default(),
            source: source.unwrap_or_default(),
        }
    }

    /// 이미지가 있는지 확인.
    pub fn has_image(&self) -> bool {
        !self.image.trim().is_empty()
    }
}
