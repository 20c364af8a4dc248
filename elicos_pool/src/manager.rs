//! `ItemPoolManager`：候选池 + 已选槽位的状态容器，对外只暴露动作入口与只读查询。
//!
//! 约定：
//! - 每个 (owner, tag) 对应一个长期存在的 manager，原地修改
//! - 所有业务层面的异常（id 不存在、取数为空、翻页耗尽）都退化为 no-op
//! - 任何查询返回前，已选下标都落在 `[0, pool.len())` 内且互不重复
use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    action::PoolAction,
    fetcher::{FetchError, ItemFetcher},
    model::{Identifiable, PoolView},
    options::PoolOptions,
    pool::{FetchTicket, Pool},
    selection::Selection,
};

/// 单次翻页最多尝试的步数。
pub const NAVIGATION_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// 下一个候选下标；向前越过 0 时返回 None。
    fn step(self, index: usize) -> Option<usize> {
        match self {
            Direction::Forward => index.checked_add(1),
            Direction::Backward => index.checked_sub(1),
        }
    }
}

/// 候选池管理器。
pub struct ItemPoolManager<T, F: ?Sized> {
    /// 归属方标识（例如词汇行 id）
    id: String,
    /// 候选池（含 tag/页码/代数）
    pool: Pool<T>,
    /// 可见槽位
    selection: Selection,
    /// 初始化时的目标槽位数
    initial_size: usize,
    /// 注入的取数实现
    fetcher: Arc<F>,
}

impl<T, F> ItemPoolManager<T, F>
where
    T: Identifiable + Clone + Send + 'static,
    F: ItemFetcher<T> + ?Sized,
{
    /// 创建并初始化 manager。
    ///
    /// - `pool` 不足 `initial_size` 时先取一页
    /// - `selected` 为空时默认选中 `[0, min(initial_size, pool.len()))`
    /// - 越界与重复的下标会被丢弃
    ///
    /// 取数失败只记录日志，初始化总能完成（可能得到更少的槽位）。
    pub async fn create(
        id: impl Into<String>,
        tag: impl Into<String>,
        pool: Vec<T>,
        selected: Vec<usize>,
        options: PoolOptions,
        fetcher: Arc<F>,
    ) -> Self {
        let options = options.normalized();
        let mut manager = Self {
            id: id.into(),
            pool: Pool::new(tag, pool, options.current_page, options.pool_chunk_size),
            selection: Selection::from_indexes(selected),
            initial_size: options.initial_size,
            fetcher,
        };
        manager.initialize().await;
        manager
    }

    async fn initialize(&mut self) {
        if self.pool.len() < self.initial_size {
            self.fill_pool().await;
        }
        if self.selection.is_empty() {
            self.selection = Selection::first(self.initial_size.min(self.pool.len()));
        }
        self.selection.retain_below(self.pool.len());
        debug!(
            pool_id = %self.id,
            tag = %self.pool.tag(),
            pool_len = self.pool.len(),
            selected = ?self.selection.as_slice(),
            "item pool initialized"
        );
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&self) -> &str {
        self.pool.tag()
    }

    pub fn current_page(&self) -> u32 {
        self.pool.current_page()
    }

    /// 已选下标（按槽位顺序）。
    pub fn selected_indexes(&self) -> &[usize] {
        self.selection.as_slice()
    }

    /// 按槽位顺序返回已选条目。
    pub fn selected_items(&self) -> Vec<T> {
        self.selection
            .iter()
            .filter_map(|i| self.pool.get(i).cloned())
            .collect()
    }

    /// 池内全部候选（只读）。
    pub fn all_items(&self) -> &[T] {
        self.pool.items()
    }

    /// 生成 UI 层只读快照。
    pub fn view(&self) -> PoolView<T> {
        PoolView {
            id: self.id.clone(),
            tag: self.pool.tag().to_owned(),
            selected: self.selected_items(),
            pool_len: self.pool.len(),
            current_page: self.pool.current_page(),
        }
    }

    /// 唯一的修改入口。
    ///
    /// 返回值：
    /// - `Add`：新槽位上的条目；池无法增长时为 None
    /// - `Next`/`Prev`：槽位的新条目；无法移动时为原条目；id 不在任何槽位时为 None
    /// - `Delete`/`UpdateTag`：None
    pub async fn manage(&mut self, action: PoolAction) -> Option<T> {
        debug!(pool_id = %self.id, ?action, "manage item pool");
        match action {
            PoolAction::Add => self.add_slot().await,
            PoolAction::Delete { item_id } => {
                self.delete_slot(&item_id);
                None
            }
            PoolAction::Next { item_id } => self.step_slot(&item_id, Direction::Forward).await,
            PoolAction::Prev { item_id } => self.step_slot(&item_id, Direction::Backward).await,
            PoolAction::UpdateTag { tag } => {
                self.update_tag(tag).await;
                None
            }
        }
    }

    async fn add_slot(&mut self) -> Option<T> {
        let next = self.selection.highest().map_or(0, |i| i + 1);
        if next >= self.pool.len() {
            self.fill_pool().await;
        }
        let item = self.pool.get(next).cloned()?;
        self.selection.push(next);
        Some(item)
    }

    /// 持有 `item_id` 的槽位所指向的池下标；只在已选下标里找。
    fn slot_index(&self, item_id: &str) -> Option<usize> {
        self.selection
            .iter()
            .find(|&i| self.pool.get(i).is_some_and(|item| item.id() == item_id))
    }

    fn delete_slot(&mut self, item_id: &str) {
        if let Some(index) = self.slot_index(item_id) {
            self.selection.remove_index(index);
        }
    }

    async fn step_slot(&mut self, item_id: &str, direction: Direction) -> Option<T> {
        let current = self.slot_index(item_id)?;
        self.navigate(current, direction).await
    }

    /// 从 `current` 出发按方向寻找第一个未选中的下标；两端都不回绕。
    ///
    /// - 越过 0：原地不动
    /// - 走到池尾：先取一页再继续；取不到新条目则原地不动
    /// - 超过 `NAVIGATION_LIMIT` 步仍未找到：原地不动
    async fn navigate(&mut self, current: usize, direction: Direction) -> Option<T> {
        let mut candidate = current;
        let mut chosen = None;
        for _ in 0..NAVIGATION_LIMIT {
            candidate = match direction.step(candidate) {
                Some(c) => c,
                None => break,
            };
            if candidate >= self.pool.len()
                && (self.fill_pool().await == 0 || candidate >= self.pool.len())
            {
                break;
            }
            if !self.selection.contains(candidate) {
                chosen = Some(candidate);
                break;
            }
        }

        match chosen {
            Some(next) if self.selection.replace(current, next) => {
                debug!(pool_id = %self.id, from = current, to = next, "slot moved");
                self.pool.get(next).cloned()
            }
            _ => {
                debug!(pool_id = %self.id, index = current, ?direction, "slot kept");
                self.pool.get(current).cloned()
            }
        }
    }

    async fn update_tag(&mut self, tag: String) {
        let kept = self.selected_items();
        self.selection = Selection::first(kept.len());
        self.pool.reset_to(tag, kept);
        self.fill_pool().await;
    }

    /// 按当前页码取一页并追加到池尾，返回追加的条目数。
    async fn fill_pool(&mut self) -> usize {
        let ticket = self.pool.ticket();
        let result = self
            .fetcher
            .fetch(&ticket.tag, ticket.page, ticket.chunk_size)
            .await;
        self.apply_fetch(&ticket, result)
    }

    pub(crate) fn begin_fetch(&self) -> (FetchTicket, Arc<F>) {
        (self.pool.ticket(), Arc::clone(&self.fetcher))
    }

    /// 合并取数结果；失败只记录日志。
    pub(crate) fn apply_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<T>, FetchError>,
    ) -> usize {
        match result {
            Ok(batch) => {
                let received = batch.len();
                let added = self.pool.absorb(ticket, batch);
                debug!(
                    pool_id = %self.id,
                    tag = %ticket.tag,
                    page = ticket.page,
                    received,
                    added,
                    pool_len = self.pool.len(),
                    "fill item pool"
                );
                added
            }
            Err(err) => {
                warn!(
                    pool_id = %self.id,
                    tag = %ticket.tag,
                    page = ticket.page,
                    error = %err,
                    "failed to fetch items"
                );
                0
            }
        }
    }
}
