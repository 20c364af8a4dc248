//! `selection`：可见槽位持有的池下标。
//!
//! 约定：
//! - 每个槽位一个下标，按槽位顺序存放
//! - 同一下标不会出现在两个槽位里

/// 已选下标（每个元素对应一个 UI 槽位）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indexes: Vec<usize>,
}

impl Selection {
    /// 从调用方给定的下标构造；重复的下标只保留第一次出现。
    pub fn from_indexes(indexes: impl IntoIterator<Item = usize>) -> Self {
        let mut out: Vec<usize> = Vec::new();
        for i in indexes {
            if !out.contains(&i) {
                out.push(i);
            }
        }
        Self { indexes: out }
    }

    /// `[0, n)` 的默认选择。
    pub fn first(n: usize) -> Self {
        Self {
            indexes: (0..n).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indexes
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indexes.iter().copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indexes.contains(&index)
    }

    /// 最大的已选下标；空选择返回 None。
    pub fn highest(&self) -> Option<usize> {
        self.indexes.iter().copied().max()
    }

    /// 追加槽位；下标已存在时返回 false。
    pub fn push(&mut self, index: usize) -> bool {
        if self.contains(index) {
            return false;
        }
        self.indexes.push(index);
        true
    }

    /// 移除持有该下标的槽位，其余槽位保持原有顺序。
    pub fn remove_index(&mut self, index: usize) -> bool {
        let before = self.indexes.len();
        self.indexes.retain(|&i| i != index);
        self.indexes.len() != before
    }

    /// 把持有 `from` 的槽位改为 `to`（槽位位置不变）。
    pub fn replace(&mut self, from: usize, to: usize) -> bool {
        if from != to && self.contains(to) {
            return false;
        }
        match self.indexes.iter_mut().find(|i| **i == from) {
            Some(slot) => {
                *slot = to;
                true
            }
            None => false,
        }
    }

    /// 丢弃越界下标（`>= len`）。
    pub fn retain_below(&mut self, len: usize) {
        self.indexes.retain(|&i| i < len);
    }
}
