use serde::{Deserialize, Serialize};

/// 可被候选池管理的条目：manager 只读取 `id`，不解释其余字段。
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// 图片候选（词汇配图）。
///
/// 字段与图片搜索结果对齐：`src` 为展示用 URL，`alt` 为替代文本。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    /// 稳定标识（同一个池内唯一）
    pub id: String,
    /// 图片地址
    pub src: String,
    /// 替代文本
    pub alt: String,
}

impl ImageItem {
    pub fn new(id: impl Into<String>, src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            alt: alt.into(),
        }
    }
}

impl Identifiable for ImageItem {
    fn id(&self) -> &str {
        &self.id
    }
}

/// manager 给 UI 的“快照视图”。
///
/// UI 层只读 `PoolView`，所有修改都通过 `PoolAction` 提交。
#[derive(Debug, Clone, PartialEq)]
pub struct PoolView<T> {
    /// 归属方标识（例如词汇行 id）
    pub id: String,
    /// 当前检索关键词
    pub tag: String,
    /// 按槽位顺序排列的已选条目
    pub selected: Vec<T>,
    /// 池内候选总数
    pub pool_len: usize,
    /// 下一次取数使用的页码
    pub current_page: u32,
}
