//! SharedItemPool 句柄测试（串行动作 + 过期取数丢弃）

mod common;

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use common::{RecordingFetcher, ids, image, images};
use elicos_pool::{
    FetchError, ImageItem, ItemFetcher, ItemPoolManager, PoolAction, PoolOptions, SharedItemPool,
};
use tokio::sync::Notify;

/// 第一次调用会停在 `gate` 上，直到测试放行；其余调用立即返回。
struct GatedFetcher {
    entered: Notify,
    gate: Notify,
    calls: AtomicUsize,
}

impl GatedFetcher {
    fn new() -> Self {
        Self {
            entered: Notify::new(),
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ItemFetcher<ImageItem> for GatedFetcher {
    async fn fetch(
        &self,
        tag: &str,
        page: u32,
        chunk_size: usize,
    ) -> Result<Vec<ImageItem>, FetchError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.entered.notify_one();
            self.gate.notified().await;
        }
        Ok((0..chunk_size)
            .map(|n| image(&format!("{tag}-p{page}-{n}")))
            .collect())
    }
}

#[tokio::test]
async fn test_clones_share_one_manager() {
    let fetcher = Arc::new(RecordingFetcher::empty());
    let manager = ItemPoolManager::create(
        "word-1",
        "cat",
        images("item", 10),
        Vec::new(),
        PoolOptions::default(),
        fetcher,
    )
    .await;
    let handle = SharedItemPool::new(manager);
    let other = handle.clone();

    let moved = handle.manage(PoolAction::next("item-0")).await;
    assert_eq!(moved, Some(image("item-3")));
    assert_eq!(ids(&other.selected_items().await), ["item-3", "item-1", "item-2"]);
    assert_eq!(other.all_items().await.len(), 10);
    assert_eq!(other.tag().await, "cat");
}

#[tokio::test]
async fn test_prefetch_grows_pool() {
    let fetcher = Arc::new(RecordingFetcher::generated());
    let manager = ItemPoolManager::create(
        "word-1",
        "cat",
        images("item", 3),
        Vec::new(),
        PoolOptions::default(),
        Arc::clone(&fetcher),
    )
    .await;
    let handle = SharedItemPool::new(manager);

    assert_eq!(handle.prefetch().await, 5);
    let view = handle.view().await;
    assert_eq!(view.pool_len, 8);
    assert_eq!(view.current_page, 2);
    assert_eq!(fetcher.call_count(), 1);
}

#[tokio::test]
async fn test_stale_prefetch_is_discarded_after_tag_update() {
    let fetcher = Arc::new(GatedFetcher::new());
    let manager = ItemPoolManager::create(
        "word-1",
        "cat",
        images("item", 10),
        Vec::new(),
        PoolOptions::default(),
        Arc::clone(&fetcher),
    )
    .await;
    let handle = SharedItemPool::new(manager);

    // 预取停在旧 tag 的请求上
    let prefetch = tokio::spawn({
        let handle = handle.clone();
        async move { handle.prefetch().await }
    });
    fetcher.entered.notified().await;

    // 预取未持锁，更换 tag 可以立即完成
    handle.manage(PoolAction::update_tag("dog")).await;
    fetcher.gate.notify_one();
    assert_eq!(prefetch.await.unwrap(), 0);

    let all = ids(&handle.all_items().await);
    assert!(all.iter().all(|id| !id.starts_with("cat-")), "{all:?}");
    assert_eq!(
        all,
        [
            "item-0", "item-1", "item-2", "dog-p1-0", "dog-p1-1", "dog-p1-2", "dog-p1-3",
            "dog-p1-4"
        ]
    );
    assert_eq!(handle.tag().await, "dog");
}
