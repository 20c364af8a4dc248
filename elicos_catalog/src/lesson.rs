//! 课程：级别 + 主题 + 一组检索词及其配图，整体保存在 `JsonStore` 的 `lessons` key 下。
//!
//! 约定：
//! - id 由保存时刻生成（`lesson_{毫秒时间戳}`），同一毫秒内重复时追加序号
//! - `created_at` 只在新建时写入；每次修改都刷新 `updated_at`
//! - 读取失败按空列表处理（见 `JsonStore::load`）
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::StoreError, store::JsonStore};

pub const LESSONS_KEY: &str = "lessons";

/// 默认返回的最近课程数。
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// 课程里的一个检索词与选中的图片地址。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonVocabulary {
    pub id: String,
    pub search_term: String,
    pub pictures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub level: String,
    pub topic: String,
    pub vocabulary: Vec<LessonVocabulary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建课程时由调用方提供的内容。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonDraft {
    pub level: String,
    pub topic: String,
    pub vocabulary: Vec<LessonVocabulary>,
}

/// 部分更新；`None` 的字段保持不变。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonUpdate {
    pub level: Option<String>,
    pub topic: Option<String>,
    pub vocabulary: Option<Vec<LessonVocabulary>>,
}

pub fn load_lessons(store: &JsonStore) -> Vec<Lesson> {
    store.load(LESSONS_KEY, Vec::new())
}

pub fn lesson_by_id(store: &JsonStore, id: &str) -> Option<Lesson> {
    load_lessons(store).into_iter().find(|l| l.id == id)
}

/// 保存新课程，返回带 id 与时间戳的完整记录。
pub fn save_lesson(store: &JsonStore, draft: LessonDraft) -> Result<Lesson, StoreError> {
    let mut lessons = load_lessons(store);
    let now = Utc::now();
    let id = unique_id(&lessons, now);
    let lesson = Lesson {
        id,
        level: draft.level,
        topic: draft.topic,
        vocabulary: draft.vocabulary,
        created_at: now,
        updated_at: now,
    };
    lessons.push(lesson.clone());
    store.save(LESSONS_KEY, &lessons)?;
    debug!(lesson_id = %lesson.id, topic = %lesson.topic, "lesson saved");
    Ok(lesson)
}

fn unique_id(lessons: &[Lesson], now: DateTime<Utc>) -> String {
    let base = format!("lesson_{}", now.timestamp_millis());
    let taken = |id: &str| lessons.iter().any(|l| l.id == id);
    if !taken(&base) {
        return base;
    }
    let mut n = 1u32;
    loop {
        let id = format!("{base}_{n}");
        if !taken(&id) {
            return id;
        }
        n += 1;
    }
}

/// 修改课程；不存在时返回 `Ok(None)`。
pub fn update_lesson(
    store: &JsonStore,
    id: &str,
    update: LessonUpdate,
) -> Result<Option<Lesson>, StoreError> {
    let mut lessons = load_lessons(store);
    let Some(lesson) = lessons.iter_mut().find(|l| l.id == id) else {
        return Ok(None);
    };
    if let Some(level) = update.level {
        lesson.level = level;
    }
    if let Some(topic) = update.topic {
        lesson.topic = topic;
    }
    if let Some(vocabulary) = update.vocabulary {
        lesson.vocabulary = vocabulary;
    }
    lesson.updated_at = Utc::now().max(lesson.updated_at);
    let updated = lesson.clone();
    store.save(LESSONS_KEY, &lessons)?;
    Ok(Some(updated))
}

/// 删除课程；返回是否确实删除了条目。
pub fn delete_lesson(store: &JsonStore, id: &str) -> Result<bool, StoreError> {
    let mut lessons = load_lessons(store);
    let before = lessons.len();
    lessons.retain(|l| l.id != id);
    if lessons.len() == before {
        return Ok(false);
    }
    store.save(LESSONS_KEY, &lessons)?;
    Ok(true)
}

pub fn lessons_by_level(store: &JsonStore, level: &str) -> Vec<Lesson> {
    load_lessons(store)
        .into_iter()
        .filter(|l| l.level == level)
        .collect()
}

/// 主题包含 `topic` 的课程（不区分大小写）。
pub fn lessons_by_topic(store: &JsonStore, topic: &str) -> Vec<Lesson> {
    let needle = topic.to_lowercase();
    load_lessons(store)
        .into_iter()
        .filter(|l| l.topic.to_lowercase().contains(&needle))
        .collect()
}

/// 按 `updated_at` 从新到旧取前 `limit` 个。
pub fn recent_lessons(store: &JsonStore, limit: usize) -> Vec<Lesson> {
    let mut lessons = load_lessons(store);
    lessons.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    lessons.truncate(limit);
    lessons
}
