//! 测试用取数桩：记录每次调用参数。
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use elicos_pool::{FetchError, ImageItem, ItemFetcher};

pub fn image(id: &str) -> ImageItem {
    ImageItem::new(id, format!("/images/{id}.jpg"), id)
}

/// `prefix-0 .. prefix-(count-1)`
pub fn images(prefix: &str, count: usize) -> Vec<ImageItem> {
    (0..count).map(|i| image(&format!("{prefix}-{i}"))).collect()
}

pub fn ids(items: &[ImageItem]) -> Vec<String> {
    items.iter().map(|i| i.id.clone()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub tag: String,
    pub page: u32,
    pub chunk_size: usize,
}

enum Source {
    /// 从固定列表分页：`items[offset + (page-1)*chunk ..][..chunk]`
    Slice { items: Vec<ImageItem>, offset: usize },
    /// 按 tag 生成：`{tag}-{n}`，最多 `total` 条
    Generated { total: Option<usize> },
    Failing,
}

pub struct RecordingFetcher {
    source: Source,
    calls: Mutex<Vec<Call>>,
}

impl RecordingFetcher {
    pub fn slice(items: Vec<ImageItem>, offset: usize) -> Self {
        Self::with_source(Source::Slice { items, offset })
    }

    pub fn generated() -> Self {
        Self::with_source(Source::Generated { total: None })
    }

    pub fn generated_up_to(total: usize) -> Self {
        Self::with_source(Source::Generated { total: Some(total) })
    }

    pub fn empty() -> Self {
        Self::slice(Vec::new(), 0)
    }

    pub fn failing() -> Self {
        Self::with_source(Source::Failing)
    }

    fn with_source(source: Source) -> Self {
        Self {
            source,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ItemFetcher<ImageItem> for RecordingFetcher {
    async fn fetch(
        &self,
        tag: &str,
        page: u32,
        chunk_size: usize,
    ) -> Result<Vec<ImageItem>, FetchError> {
        self.calls.lock().unwrap().push(Call {
            tag: tag.to_owned(),
            page,
            chunk_size,
        });
        let start = (page.saturating_sub(1) as usize) * chunk_size;
        match &self.source {
            Source::Slice { items, offset } => Ok(items
                .iter()
                .skip(offset + start)
                .take(chunk_size)
                .cloned()
                .collect()),
            Source::Generated { total } => {
                let end = match total {
                    Some(total) => (start + chunk_size).min(*total),
                    None => start + chunk_size,
                };
                Ok((start..end).map(|n| image(&format!("{tag}-{n}"))).collect())
            }
            Source::Failing => Err(FetchError::Transport("connection refused".to_string())),
        }
    }
}
