//! `SharedItemPool`：UI 层持有的 manager 句柄。
//!
//! 同一句柄上的动作按加锁顺序串行执行；`prefetch` 在取数期间释放锁，
//! 结果回来时用 `FetchTicket` 校验，期间发生过 tag 更换或其他取数的结果会被丢弃。
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    action::PoolAction,
    fetcher::ItemFetcher,
    manager::ItemPoolManager,
    model::{Identifiable, PoolView},
};

pub struct SharedItemPool<T, F: ?Sized> {
    inner: Arc<Mutex<ItemPoolManager<T, F>>>,
}

impl<T, F: ?Sized> Clone for SharedItemPool<T, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, F> SharedItemPool<T, F>
where
    T: Identifiable + Clone + Send + 'static,
    F: ItemFetcher<T> + ?Sized,
{
    pub fn new(manager: ItemPoolManager<T, F>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    pub async fn manage(&self, action: PoolAction) -> Option<T> {
        self.inner.lock().await.manage(action).await
    }

    pub async fn selected_items(&self) -> Vec<T> {
        self.inner.lock().await.selected_items()
    }

    pub async fn all_items(&self) -> Vec<T> {
        self.inner.lock().await.all_items().to_vec()
    }

    pub async fn tag(&self) -> String {
        self.inner.lock().await.tag().to_owned()
    }

    pub async fn view(&self) -> PoolView<T> {
        self.inner.lock().await.view()
    }

    /// 后台预取一页；返回实际追加的条目数（过期结果为 0）。
    pub async fn prefetch(&self) -> usize {
        let (ticket, fetcher) = self.inner.lock().await.begin_fetch();
        let result = fetcher
            .fetch(&ticket.tag, ticket.page, ticket.chunk_size)
            .await;
        self.inner.lock().await.apply_fetch(&ticket, result)
    }
}
