//! `fetcher`：候选来源抽象。
//!
//! core 不关心候选来自网络图片搜索、本地目录还是测试桩；
//! 只要求按 `(tag, page, chunk_size)` 分页返回一批条目。

use std::{future::Future, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;

/// 取数失败的原因。manager 对所有变体一视同仁：记录日志，池不增长。
#[derive(Debug, Error)]
pub enum FetchError {
    /// 缺少凭据等配置
    #[error("fetcher not configured: {0}")]
    NotConfigured(String),
    /// 网络/IO 层失败
    #[error("transport error: {0}")]
    Transport(String),
    /// 后端返回了错误状态
    #[error("backend returned status {status}: {message}")]
    Backend { status: u16, message: String },
}

/// 候选来源。
///
/// 约定：
/// - `page` 从 1 开始
/// - 返回空列表表示“没有更多”，manager 不会推进页码
#[async_trait]
pub trait ItemFetcher<T: Send + 'static>: Send + Sync {
    async fn fetch(&self, tag: &str, page: u32, chunk_size: usize) -> Result<Vec<T>, FetchError>;
}

#[async_trait]
impl<T, F> ItemFetcher<T> for Arc<F>
where
    T: Send + 'static,
    F: ItemFetcher<T> + ?Sized,
{
    async fn fetch(&self, tag: &str, page: u32, chunk_size: usize) -> Result<Vec<T>, FetchError> {
        (**self).fetch(tag, page, chunk_size).await
    }
}

/// 把闭包包装成 `ItemFetcher`（测试桩、临时数据源）。
pub struct FnFetcher<Func> {
    func: Func,
}

impl<Func> FnFetcher<Func> {
    pub fn new(func: Func) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<T, Func, Fut> ItemFetcher<T> for FnFetcher<Func>
where
    T: Send + 'static,
    Func: Fn(String, u32, usize) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<T>, FetchError>> + Send + 'static,
{
    async fn fetch(&self, tag: &str, page: u32, chunk_size: usize) -> Result<Vec<T>, FetchError> {
        (self.func)(tag.to_owned(), page, chunk_size).await
    }
}
