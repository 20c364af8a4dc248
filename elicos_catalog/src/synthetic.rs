use async_trait::async_trait;
use elicos_pool::{FetchError, ImageItem, ItemFetcher};

use crate::tag_slug;

/// 按 tag 生成占位图片：第 n 张为 `{slug}-{n}`，地址 `/images/{slug}-{n+1}.jpg`。
///
/// `limit` 为每个 tag 可生成的总数；None 表示无限。
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticImageFetcher {
    limit: Option<usize>,
}

impl SyntheticImageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

#[async_trait]
impl ItemFetcher<ImageItem> for SyntheticImageFetcher {
    async fn fetch(
        &self,
        tag: &str,
        page: u32,
        chunk_size: usize,
    ) -> Result<Vec<ImageItem>, FetchError> {
        let slug = tag_slug(tag);
        if slug.is_empty() {
            return Ok(Vec::new());
        }
        let start = (page.max(1) as usize - 1).saturating_mul(chunk_size);
        let mut end = start.saturating_add(chunk_size);
        if let Some(limit) = self.limit {
            end = end.min(limit);
        }
        Ok((start..end)
            .map(|n| {
                ImageItem::new(
                    format!("{slug}-{n}"),
                    format!("/images/{slug}-{}.jpg", n + 1),
                    tag.trim(),
                )
            })
            .collect())
    }
}
