//! 词汇表：每个词汇带若干配图，整体保存在 `JsonStore` 的 `vocabulary` key 下。
use chrono::{DateTime, Utc};
use elicos_pool::ImageItem;
use serde::{Deserialize, Serialize};

use crate::{error::StoreError, store::JsonStore};

pub const VOCABULARY_KEY: &str = "vocabulary";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyWord {
    pub id: String,
    pub word: String,
    pub definition: String,
    pub images: Vec<ImageItem>,
    pub created_at: DateTime<Utc>,
}

impl VocabularyWord {
    pub fn new(id: impl Into<String>, word: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            word: word.into(),
            definition: definition.into(),
            images: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_images(mut self, images: Vec<ImageItem>) -> Self {
        self.images = images;
        self
    }
}

/// 读取全部词汇；不存在或损坏时返回空列表。
pub fn load_vocabulary(store: &JsonStore) -> Vec<VocabularyWord> {
    store.load(VOCABULARY_KEY, Vec::new())
}

/// 按 id 新增或替换词汇（替换时保留原 `created_at`）。
pub fn upsert_word(store: &JsonStore, mut word: VocabularyWord) -> Result<(), StoreError> {
    let mut words = load_vocabulary(store);
    match words.iter_mut().find(|w| w.id == word.id) {
        Some(existing) => {
            word.created_at = existing.created_at;
            *existing = word;
        }
        None => words.push(word),
    }
    store.save(VOCABULARY_KEY, &words)
}

/// 删除词汇；返回是否确实删除了条目。
pub fn delete_word(store: &JsonStore, id: &str) -> Result<bool, StoreError> {
    let mut words = load_vocabulary(store);
    let before = words.len();
    words.retain(|w| w.id != id);
    if words.len() == before {
        return Ok(false);
    }
    store.save(VOCABULARY_KEY, &words)?;
    Ok(true)
}

/// 对 `word_id` 的配图做一次修改并保存；词汇不存在时不写盘，返回 false。
fn edit_images(
    store: &JsonStore,
    word_id: &str,
    edit: impl FnOnce(&mut Vec<ImageItem>) -> bool,
) -> Result<bool, StoreError> {
    let mut words = load_vocabulary(store);
    let Some(word) = words.iter_mut().find(|w| w.id == word_id) else {
        return Ok(false);
    };
    if !edit(&mut word.images) {
        return Ok(false);
    }
    store.save(VOCABULARY_KEY, &words)?;
    Ok(true)
}

/// 给词汇追加一张配图。
pub fn add_image_to_word(
    store: &JsonStore,
    word_id: &str,
    image: ImageItem,
) -> Result<bool, StoreError> {
    edit_images(store, word_id, |images| {
        images.push(image);
        true
    })
}

/// 删除词汇下所有 id 为 `image_id` 的配图。
pub fn delete_image_from_word(
    store: &JsonStore,
    word_id: &str,
    image_id: &str,
) -> Result<bool, StoreError> {
    edit_images(store, word_id, |images| {
        let before = images.len();
        images.retain(|image| image.id != image_id);
        images.len() != before
    })
}

/// 用 `image` 替换词汇下 id 为 `image_id` 的配图。
pub fn update_image_in_word(
    store: &JsonStore,
    word_id: &str,
    image_id: &str,
    image: ImageItem,
) -> Result<bool, StoreError> {
    edit_images(store, word_id, |images| {
        let mut replaced = false;
        for slot in images.iter_mut().filter(|i| i.id == image_id) {
            *slot = image.clone();
            replaced = true;
        }
        replaced
    })
}
