//! 课程存储测试

use elicos_catalog::{
    JsonStore,
    lesson::{
        DEFAULT_RECENT_LIMIT, LESSONS_KEY, LessonDraft, LessonUpdate, LessonVocabulary,
        delete_lesson, lesson_by_id, lessons_by_level, lessons_by_topic, load_lessons,
        recent_lessons, save_lesson, update_lesson,
    },
};

fn draft(level: &str, topic: &str) -> LessonDraft {
    LessonDraft {
        level: level.to_string(),
        topic: topic.to_string(),
        vocabulary: vec![LessonVocabulary {
            id: "v1".to_string(),
            search_term: "cat".to_string(),
            pictures: vec!["/img/cat-0.jpg".to_string()],
        }],
    }
}

#[test]
fn test_save_assigns_id_and_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());

    let lesson = save_lesson(&store, draft("beginner", "Animals")).unwrap();

    assert!(lesson.id.starts_with("lesson_"));
    assert_eq!(lesson.created_at, lesson.updated_at);
    assert_eq!(lesson_by_id(&store, &lesson.id), Some(lesson));
    assert!(store.exists(LESSONS_KEY));
}

#[test]
fn test_ids_stay_unique_within_one_millisecond() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());

    let ids: Vec<String> = (0..5)
        .map(|_| save_lesson(&store, draft("beginner", "Animals")).unwrap().id)
        .collect();

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(load_lessons(&store).len(), 5);
}

#[test]
fn test_update_changes_given_fields_and_bumps_updated_at() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    let saved = save_lesson(&store, draft("beginner", "Animals")).unwrap();

    let updated = update_lesson(
        &store,
        &saved.id,
        LessonUpdate {
            topic: Some("Farm animals".to_string()),
            ..LessonUpdate::default()
        },
    )
    .unwrap()
    .unwrap();

    assert_eq!(updated.topic, "Farm animals");
    assert_eq!(updated.level, "beginner");
    assert_eq!(updated.vocabulary, saved.vocabulary);
    assert_eq!(updated.created_at, saved.created_at);
    assert!(updated.updated_at >= saved.updated_at);
    assert_eq!(lesson_by_id(&store, &saved.id), Some(updated));
}

#[test]
fn test_update_and_delete_of_unknown_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    save_lesson(&store, draft("beginner", "Animals")).unwrap();

    assert_eq!(
        update_lesson(&store, "lesson_0", LessonUpdate::default()).unwrap(),
        None
    );
    assert!(!delete_lesson(&store, "lesson_0").unwrap());
    assert_eq!(load_lessons(&store).len(), 1);
}

#[test]
fn test_delete_lesson() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    let saved = save_lesson(&store, draft("beginner", "Animals")).unwrap();

    assert!(delete_lesson(&store, &saved.id).unwrap());
    assert!(load_lessons(&store).is_empty());
    assert_eq!(lesson_by_id(&store, &saved.id), None);
}

#[test]
fn test_filters_by_level_and_topic() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    save_lesson(&store, draft("beginner", "Wild Animals")).unwrap();
    save_lesson(&store, draft("advanced", "animal rights")).unwrap();
    save_lesson(&store, draft("beginner", "Food")).unwrap();

    assert_eq!(lessons_by_level(&store, "beginner").len(), 2);
    assert!(lessons_by_level(&store, "Beginner").is_empty());

    let topics: Vec<String> = lessons_by_topic(&store, "ANIMAL")
        .into_iter()
        .map(|l| l.topic)
        .collect();
    assert_eq!(topics, ["Wild Animals", "animal rights"]);
}

#[test]
fn test_recent_lessons_orders_by_updated_at() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    let first = save_lesson(&store, draft("beginner", "First")).unwrap();
    let second = save_lesson(&store, draft("beginner", "Second")).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    update_lesson(
        &store,
        &first.id,
        LessonUpdate {
            level: Some("elementary".to_string()),
            ..LessonUpdate::default()
        },
    )
    .unwrap();

    let recent = recent_lessons(&store, DEFAULT_RECENT_LIMIT);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, first.id);
    assert_eq!(recent[1].id, second.id);

    assert_eq!(recent_lessons(&store, 1).len(), 1);
}

#[test]
fn test_lessons_use_camel_case_json() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    save_lesson(&store, draft("beginner", "Animals")).unwrap();

    let raw: serde_json::Value = store.try_load(LESSONS_KEY).unwrap().unwrap();
    let lesson = &raw[0];
    assert!(lesson.get("createdAt").is_some());
    assert!(lesson.get("updatedAt").is_some());
    assert_eq!(lesson["vocabulary"][0]["searchTerm"], "cat");
}
