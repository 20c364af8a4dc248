//! `UnsplashImageFetcher`：通过 Unsplash 图片搜索接口取候选。
//!
//! 约定：
//! - 请求 `GET {base_url}/search/photos?client_id&query&page&per_page&content_filter=high`
//! - 未配置 access key 时不发请求，直接返回 `FetchError::NotConfigured`
//! - 非 2xx 响应映射为 `FetchError::Backend`，连接/解析失败映射为 `FetchError::Transport`
use std::time::Duration;

use async_trait::async_trait;
use elicos_pool::{FetchError, ImageItem, ItemFetcher};
use serde::Deserialize;
use tracing::debug;

pub const UNSPLASH_API_BASE_URL: &str = "https://api.unsplash.com";

/// 保存 access key 的环境变量。
pub const ACCESS_KEY_ENV: &str = "ELICOS_UNSPLASH_ACCESS_KEY";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    urls: PhotoUrls,
    #[serde(default)]
    alt_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    small: String,
}

#[derive(Debug, Clone)]
pub struct UnsplashImageFetcher {
    base_url: String,
    access_key: Option<String>,
    client: reqwest::Client,
}

impl UnsplashImageFetcher {
    /// 空白 key 视为未配置。
    pub fn new(access_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .connect_timeout(Duration::from_secs(3))
            .build()
            .unwrap_or_default();
        Self {
            base_url: UNSPLASH_API_BASE_URL.to_owned(),
            access_key: access_key
                .map(|key| key.trim().to_owned())
                .filter(|key| !key.is_empty()),
            client,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.access_key.is_some()
    }
}

#[async_trait]
impl ItemFetcher<ImageItem> for UnsplashImageFetcher {
    async fn fetch(
        &self,
        tag: &str,
        page: u32,
        chunk_size: usize,
    ) -> Result<Vec<ImageItem>, FetchError> {
        let Some(access_key) = self.access_key.as_deref() else {
            return Err(FetchError::NotConfigured(format!(
                "unsplash access key missing (set {ACCESS_KEY_ENV})"
            )));
        };
        let query = tag.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/search/photos", self.base_url.trim_end_matches('/'));
        let page = page.max(1).to_string();
        let per_page = chunk_size.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client_id", access_key),
                ("query", query),
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
                ("content_filter", "high"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Backend {
                status: status.as_u16(),
                message: message.trim().to_owned(),
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Transport(format!("invalid search response: {e}")))?;
        debug!(query, page = %page, found = body.results.len(), "unsplash search");

        Ok(body
            .results
            .into_iter()
            .map(|photo| {
                let alt = photo
                    .alt_description
                    .filter(|alt| !alt.trim().is_empty())
                    .unwrap_or_else(|| query.to_owned());
                ImageItem::new(photo.id, photo.urls.small, alt)
            })
            .collect())
    }
}
