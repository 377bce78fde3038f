/// Integration tests for the entry workflow
///
/// Drives raw JSON payloads through validation, the CRUD service and the
/// flat-file store the way the HTTP and CLI adapters do.
use journal::db::{EntryStore, JsonFileStore};
use journal::services::{EntryPatch, EntryService, NewEntry, ServiceError, ValidationError};
use journal::testing::{new_entry_json, TEN_WORDS};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    fn journal_file(&self) -> PathBuf {
        self.temp_dir.path().join("backend").join("reflections.json")
    }

    fn service(&self) -> EntryService {
        EntryService::new(Arc::new(JsonFileStore::new(self.journal_file())))
    }
}

#[tokio::test]
async fn test_example_payload_is_stored_intact() {
    let ctx = TestContext::new();
    let service = ctx.service();

    let payload = json!({
        "weekOfJournal": 5,
        "journalName": "X",
        "journalDate": "2024-01-01",
        "taskName": "Y",
        "taskDescription": "one two three four five six seven eight nine ten",
        "technologies": ["HTML"]
    });

    let created = service
        .create(NewEntry::from_json(&payload).unwrap())
        .await
        .unwrap();

    assert_eq!(created.entry.task_description, TEN_WORDS);
    assert_eq!(created.entry.technologies, vec!["HTML".to_string()]);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(ctx.journal_file()).unwrap()).unwrap();
    assert_eq!(raw[0]["taskDescription"], TEN_WORDS);
    assert_eq!(raw[0]["weekOfJournal"], 5);
    assert_eq!(raw[0]["id"], created.entry.id.as_str());
}

#[tokio::test]
async fn test_create_read_delete_round_trip() {
    let ctx = TestContext::new();
    let service = ctx.service();

    let first = service
        .create(NewEntry::from_json(&new_entry_json(1)).unwrap())
        .await
        .unwrap()
        .entry;
    let second = service
        .create(NewEntry::from_json(&new_entry_json(2)).unwrap())
        .await
        .unwrap()
        .entry;

    let all = service.list().await.unwrap();
    assert_eq!(all, vec![first.clone(), second.clone()]);

    assert_eq!(service.delete(&first.id).await.unwrap(), 1);
    let all = service.list().await.unwrap();
    assert_eq!(all, vec![second]);
}

#[tokio::test]
async fn test_partial_update_from_json() {
    let ctx = TestContext::new();
    let service = ctx.service();
    let original = service
        .create(NewEntry::from_json(&new_entry_json(3)).unwrap())
        .await
        .unwrap()
        .entry;

    let patch = EntryPatch::from_json(&json!({
        "technologies": ["Rust", "axum"],
        "id": "hijack"
    }))
    .unwrap();
    let updated = service.update(&original.id, patch).await.unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.timestamp, original.timestamp);
    assert_eq!(updated.technologies, vec!["Rust".to_string(), "axum".to_string()]);
    assert_eq!(updated.journal_name, original.journal_name);
    assert!(updated.updated_at.is_some());

    let raw = std::fs::read_to_string(ctx.journal_file()).unwrap();
    assert!(raw.contains("\"updatedAt\""));
}

#[tokio::test]
async fn test_delete_unknown_id_keeps_file() {
    let ctx = TestContext::new();
    let service = ctx.service();
    service
        .create(NewEntry::from_json(&new_entry_json(1)).unwrap())
        .await
        .unwrap();
    let before = std::fs::read_to_string(ctx.journal_file()).unwrap();

    let result = service.delete("does-not-exist").await;

    assert!(matches!(result, Err(ServiceError::NotFound(_))));
    assert_eq!(std::fs::read_to_string(ctx.journal_file()).unwrap(), before);
}

#[tokio::test]
async fn test_description_boundary() {
    let ctx = TestContext::new();

    let mut short = new_entry_json(1);
    short["taskDescription"] = json!("one two three four five six seven eight nine");
    assert_eq!(
        NewEntry::from_json(&short),
        Err(ValidationError::TooShort(9))
    );

    let mut long = new_entry_json(1);
    long["taskDescription"] = json!("one two three four five six seven eight nine ten eleven");
    let entry = NewEntry::from_json(&long).unwrap();
    assert!(ctx.service().create(entry).await.is_ok());
}

#[tokio::test]
async fn test_malformed_file_is_replaced_on_next_write() {
    let ctx = TestContext::new();
    std::fs::create_dir_all(ctx.journal_file().parent().unwrap()).unwrap();
    std::fs::write(ctx.journal_file(), "[{\"broken\": ").unwrap();
    let service = ctx.service();

    assert!(service.list().await.unwrap().is_empty());

    let created = service
        .create(NewEntry::from_json(&new_entry_json(1)).unwrap())
        .await
        .unwrap();
    assert_eq!(created.total, 1);

    let store = JsonFileStore::new(ctx.journal_file());
    assert_eq!(store.load().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_reads_file_written_by_older_tool() {
    let ctx = TestContext::new();
    std::fs::create_dir_all(ctx.journal_file().parent().unwrap()).unwrap();
    std::fs::write(
        ctx.journal_file(),
        r#"[
  {
    "id": "3f2b8c1e-9d4a-4f6b-8e2a-1c5d7e9f0a1b",
    "weekOfJournal": 2,
    "journalName": "Learning Web APIs",
    "journalDate": "2024-02-10",
    "taskName": "Built a fetch wrapper",
    "taskDescription": "I wrapped fetch with retries and JSON parsing for the journal page",
    "technologies": ["JavaScript", "JSON"],
    "timestamp": "2024-02-10T18:22:05.123456"
  }
]"#,
    )
    .unwrap();

    let service = ctx.service();
    let entries = service.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "3f2b8c1e-9d4a-4f6b-8e2a-1c5d7e9f0a1b");

    let remaining = service
        .delete("3f2b8c1e-9d4a-4f6b-8e2a-1c5d7e9f0a1b")
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn test_file_with_mistyped_record_is_never_overwritten() {
    let ctx = TestContext::new();
    std::fs::create_dir_all(ctx.journal_file().parent().unwrap()).unwrap();
    let mut bad = new_entry_json(2);
    bad["id"] = json!("b");
    bad["timestamp"] = json!("2024-01-02T10:00:00Z");
    bad["technologies"] = json!([1, 2]);
    let mut good = new_entry_json(1);
    good["id"] = json!("a");
    good["timestamp"] = json!("2024-01-01T10:00:00Z");
    let content = serde_json::to_string_pretty(&json!([good, bad])).unwrap();
    std::fs::write(ctx.journal_file(), &content).unwrap();
    let service = ctx.service();

    assert!(service.list().await.is_err());
    let created = service
        .create(NewEntry::from_json(&new_entry_json(3)).unwrap())
        .await;
    assert!(matches!(created, Err(ServiceError::Storage(_))));
    assert!(matches!(
        service.delete("a").await,
        Err(ServiceError::Storage(_))
    ));

    assert_eq!(std::fs::read_to_string(ctx.journal_file()).unwrap(), content);
}
