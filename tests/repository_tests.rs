use chrono::Utc;
use serde_json::json;
use todo::error::TodoError;
use todo::models::User;
use todo::repository::{TaskRepository, TASK_COLLECTION, USER_COLLECTION};
use todo::storage::{DocumentStore, MemoryStore};
use uuid::Uuid;

fn repo() -> TaskRepository<MemoryStore> {
    TaskRepository::new(MemoryStore::new())
}

#[test]
fn test_create_then_list() {
    let repo = repo();
    let before = Utc::now();

    let created = repo.create("buy milk", Some("2%".into())).unwrap();

    let tasks = repo.list_all().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0], created);
    assert_eq!(tasks[0].name, "buy milk");
    assert_eq!(tasks[0].description.as_deref(), Some("2%"));
    assert!(!tasks[0].completed);
    assert!(tasks[0].created_at >= before);
    assert!(tasks[0].user_id.is_none());
}

#[test]
fn test_created_tasks_get_distinct_ids() {
    let repo = repo();
    let a = repo.create("same", None).unwrap();
    let b = repo.create("same", None).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn test_list_empty_store() {
    let repo = repo();
    assert!(matches!(repo.list_all(), Err(TodoError::EmptyResult)));
}

#[test]
fn test_list_keeps_insertion_order() {
    let repo = repo();
    repo.create("first", None).unwrap();
    repo.create("second", None).unwrap();
    repo.create("third", None).unwrap();

    let names: Vec<String> = repo.list_all().unwrap().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[test]
fn test_complete_returns_record_before_update() {
    let repo = repo();
    repo.create("buy milk", None).unwrap();

    let before = repo.complete_by_name("buy milk").unwrap();
    assert!(!before.completed);
    assert!(repo.list_all().unwrap()[0].completed);
}

#[test]
fn test_complete_twice_stays_completed() {
    let repo = repo();
    repo.create("buy milk", None).unwrap();

    let trips = repo.store().round_trips();
    repo.complete_by_name("buy milk").unwrap();
    assert!(repo.list_all().unwrap()[0].completed);

    let second = repo.complete_by_name("buy milk").unwrap();
    assert!(second.completed);
    assert!(repo.list_all().unwrap()[0].completed);

    // two completes and two lists
    assert_eq!(repo.store().round_trips() - trips, 4);
}

#[test]
fn test_complete_unknown_name() {
    let repo = repo();
    repo.create("buy milk", None).unwrap();

    match repo.complete_by_name("Buy milk") {
        Err(TodoError::NotFound(name)) => assert_eq!(name, "Buy milk"),
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert!(!repo.list_all().unwrap()[0].completed);
}

#[test]
fn test_complete_duplicate_name_affects_exactly_one() {
    let repo = repo();
    repo.create("dup", Some("one".into())).unwrap();
    repo.create("dup", Some("two".into())).unwrap();

    repo.complete_by_name("dup").unwrap();

    let tasks = repo.list_all().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks.iter().filter(|t| t.completed).count(), 1);
}

#[test]
fn test_delete_unknown_name_leaves_store_unchanged() {
    let repo = repo();
    repo.create("keep me", None).unwrap();

    assert!(matches!(repo.delete_by_name("nope"), Err(TodoError::NotFound(_))));
    assert_eq!(repo.store().len(TASK_COLLECTION), 1);
    assert_eq!(repo.list_all().unwrap()[0].name, "keep me");
}

#[test]
fn test_delete_duplicate_name_removes_one() {
    let repo = repo();
    repo.create("dup", None).unwrap();
    repo.create("dup", None).unwrap();

    repo.delete_by_name("dup").unwrap();
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn test_each_operation_is_one_round_trip() {
    let repo = repo();

    repo.create("a", None).unwrap();
    assert_eq!(repo.store().round_trips(), 1);
    repo.list_all().unwrap();
    assert_eq!(repo.store().round_trips(), 2);
    repo.complete_by_name("a").unwrap();
    assert_eq!(repo.store().round_trips(), 3);
    repo.delete_by_name("a").unwrap();
    assert_eq!(repo.store().round_trips(), 4);
}

#[test]
fn test_full_lifecycle() {
    let repo = repo();

    repo.create("buy milk", Some("2%".into())).unwrap();
    let tasks = repo.list_all().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "buy milk");
    assert!(!tasks[0].completed);

    repo.complete_by_name("buy milk").unwrap();
    assert!(repo.list_all().unwrap()[0].completed);

    repo.delete_by_name("buy milk").unwrap();
    assert!(matches!(repo.list_all(), Err(TodoError::EmptyResult)));
}

#[test]
fn test_write_failure_on_create() {
    let repo = repo();
    repo.store().set_simulate_write_error(true);

    assert!(matches!(repo.create("a", None), Err(TodoError::StoreWrite(_))));

    repo.store().set_simulate_write_error(false);
    assert!(matches!(repo.list_all(), Err(TodoError::EmptyResult)));
}

#[test]
fn test_read_failure_on_list() {
    let repo = repo();
    repo.create("a", None).unwrap();
    repo.store().set_simulate_read_error(true);

    assert!(matches!(repo.list_all(), Err(TodoError::StoreRead(_))));
}

#[test]
fn test_undecodable_document_aborts_listing() {
    let repo = repo();
    repo.create("good", None).unwrap();
    let bad = json!({"name": "no id or timestamp"}).as_object().cloned().unwrap();
    repo.store().insert_one(TASK_COLLECTION, bad).unwrap();
    repo.create("also good", None).unwrap();

    assert!(matches!(repo.list_all(), Err(TodoError::StoreRead(_))));
}

#[test]
fn test_user_collection_is_untouched() {
    let repo = repo();
    repo.create("a", None).unwrap();
    repo.list_all().unwrap();
    repo.complete_by_name("a").unwrap();
    repo.delete_by_name("a").unwrap();

    assert!(repo.store().is_empty(USER_COLLECTION));
}

#[test]
fn test_user_document_shape() {
    let user = User {
        id: Uuid::new_v4(),
        name: "alice".into(),
        password: "secret".into(),
    };
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["name"], "alice");
    assert_eq!(value["password"], "secret");

    let back: User = serde_json::from_value(value).unwrap();
    assert_eq!(back, user);
}
