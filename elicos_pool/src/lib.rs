//! `elicos_pool`：候选池（item pool）核心逻辑，不做任何 I/O。
//!
//! 设计目标：
//! - **核心可复用**：CLI/GUI/服务端都能复用同一套选择逻辑
//! - **分层清晰**：fetcher（取候选） -> pool（只增不删的候选列表） -> selection（可见槽位） -> manager（动作编排）
//! - **失败降级**：取数失败、id 不存在、翻页耗尽都退化为 no-op，不向调用方抛错
pub mod action;
pub mod fetcher;
pub mod manager;
pub mod model;
pub mod options;
pub mod pool;
pub mod selection;
pub mod shared;

pub use action::PoolAction;
pub use fetcher::{FetchError, FnFetcher, ItemFetcher};
pub use manager::ItemPoolManager;
pub use model::{Identifiable, ImageItem, PoolView};
pub use options::PoolOptions;
pub use shared::SharedItemPool;
