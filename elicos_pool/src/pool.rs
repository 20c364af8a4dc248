//! `Pool`：某个 tag 下已取回的候选列表。
//!
//! 约定：
//! - 候选只追加不删除，已分配的下标在 manager 生命周期内保持稳定
//! - 唯一的例外是 `reset_to`（更换 tag）：池收缩为调用方给定的条目，`generation` 递增
//! - 每次取数前先拿 `FetchTicket`，结果回来后用 ticket 校验是否过期
//! - 池内 id 唯一：`absorb` 丢弃已存在的 id
use tracing::debug;

use crate::model::Identifiable;

/// 一次取数请求的参数快照。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// 发起请求时池的代数
    pub generation: u64,
    /// 请求使用的 tag
    pub tag: String,
    /// 请求的页码
    pub page: u32,
    /// 请求的条目数
    pub chunk_size: usize,
}

/// 候选池。
#[derive(Debug, Clone)]
pub struct Pool<T> {
    tag: String,
    items: Vec<T>,
    current_page: u32,
    chunk_size: usize,
    /// 每次 `reset_to` 递增；旧代的取数结果会被丢弃
    generation: u64,
}

impl<T> Pool<T> {
    pub fn new(tag: impl Into<String>, items: Vec<T>, current_page: u32, chunk_size: usize) -> Self {
        Self {
            tag: tag.into(),
            items,
            current_page,
            chunk_size,
            generation: 0,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 生成下一次取数的请求参数。
    pub fn ticket(&self) -> FetchTicket {
        FetchTicket {
            generation: self.generation,
            tag: self.tag.clone(),
            page: self.current_page,
            chunk_size: self.chunk_size,
        }
    }

    /// ticket 是否仍对应当前池状态（同一代、同一页）。
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation && ticket.page == self.current_page
    }

    /// 更换 tag：池收缩为 `items`，页码回到 1，代数递增。
    pub fn reset_to(&mut self, tag: impl Into<String>, items: Vec<T>) {
        self.tag = tag.into();
        self.items = items;
        self.current_page = 1;
        self.generation += 1;
    }
}

impl<T: Identifiable> Pool<T> {
    /// 合并一批取数结果，返回实际追加的条目数。
    ///
    /// - ticket 过期：整批丢弃
    /// - 空批次：不推进页码（避免空结果导致页码空转）
    /// - 池中已有的 id 跳过，页码照常推进
    pub fn absorb(&mut self, ticket: &FetchTicket, batch: Vec<T>) -> usize {
        if !self.is_current(ticket) {
            debug!(
                tag = %ticket.tag,
                ticket_generation = ticket.generation,
                generation = self.generation,
                ticket_page = ticket.page,
                page = self.current_page,
                "discarding stale fetch result"
            );
            return 0;
        }
        if batch.is_empty() {
            return 0;
        }
        let before = self.items.len();
        for item in batch {
            if self.position(item.id()).is_none() {
                self.items.push(item);
            }
        }
        self.current_page = self.current_page.saturating_add(1);
        self.items.len() - before
    }

    /// 第一个 id 匹配的条目下标。
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}
