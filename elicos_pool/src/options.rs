//! `options`：候选池参数（页码起点、每次取数数量、初始槽位数）。

use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENT_PAGE: u32 = 1;
pub const DEFAULT_POOL_CHUNK_SIZE: usize = 5;
pub const DEFAULT_INITIAL_SIZE: usize = 3;

/// 候选池参数。
///
/// 任一字段为 0 时回退到默认值（见 `normalized`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoolOptions {
    /// 下一次取数的页码（从 1 开始）
    pub current_page: u32,
    /// 每次取数请求的条目数
    pub pool_chunk_size: usize,
    /// 初始化时的槽位数
    pub initial_size: usize,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            current_page: DEFAULT_CURRENT_PAGE,
            pool_chunk_size: DEFAULT_POOL_CHUNK_SIZE,
            initial_size: DEFAULT_INITIAL_SIZE,
        }
    }
}

impl PoolOptions {
    pub fn with_current_page(mut self, page: u32) -> Self {
        self.current_page = page;
        self
    }

    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.pool_chunk_size = size;
        self
    }

    pub fn with_initial_size(mut self, size: usize) -> Self {
        self.initial_size = size;
        self
    }

    /// 把 0 值字段替换为默认值。
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            current_page: if self.current_page == 0 {
                defaults.current_page
            } else {
                self.current_page
            },
            pool_chunk_size: if self.pool_chunk_size == 0 {
                defaults.pool_chunk_size
            } else {
                self.pool_chunk_size
            },
            initial_size: if self.initial_size == 0 {
                defaults.initial_size
            } else {
                self.initial_size
            },
        }
    }
}
