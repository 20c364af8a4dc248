use serde::{Deserialize, Serialize};

/// 提交给 manager 的动作（UI 层的“语义事件”）。
///
/// 序列化形如 `{"type":"NEXT","payload":{"itemId":"cat-3"}}`，便于从前端直接转发。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoolAction {
    /// 追加一个槽位
    Add,
    /// 删除持有该条目的槽位
    #[serde(rename_all = "camelCase")]
    Delete { item_id: String },
    /// 该槽位切换到后一个未选中的候选
    #[serde(rename_all = "camelCase")]
    Next { item_id: String },
    /// 该槽位切换到前一个未选中的候选
    #[serde(rename_all = "camelCase")]
    Prev { item_id: String },
    /// 更换检索关键词：保留已选条目，丢弃其余候选并重新取数
    UpdateTag { tag: String },
}

impl PoolAction {
    pub fn delete(item_id: impl Into<String>) -> Self {
        Self::Delete {
            item_id: item_id.into(),
        }
    }

    pub fn next(item_id: impl Into<String>) -> Self {
        Self::Next {
            item_id: item_id.into(),
        }
    }

    pub fn prev(item_id: impl Into<String>) -> Self {
        Self::Prev {
            item_id: item_id.into(),
        }
    }

    pub fn update_tag(tag: impl Into<String>) -> Self {
        Self::UpdateTag { tag: tag.into() }
    }
}
