use todo::commands::*;
use todo::error::TodoError;
use todo::repository::TaskRepository;
use todo::storage::MemoryStore;

fn repo() -> TaskRepository<MemoryStore> {
    TaskRepository::new(MemoryStore::new())
}

fn output<F>(f: F) -> String
where
    F: FnOnce(&mut Vec<u8>),
{
    let mut buf = Vec::new();
    f(&mut buf);
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_greet() {
    let out = output(|buf| cmd_greet(buf).unwrap());
    assert_eq!(out.trim_end(), GREETING);
}

#[test]
fn test_add_and_list() {
    let repo = repo();
    let out = output(|buf| cmd_add(&repo, "Test Task", Some("details".into()), buf).unwrap());
    assert!(out.contains("Task 'Test Task' added."));

    let tasks = repo.list_all().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Test Task");
    assert_eq!(tasks[0].description.as_deref(), Some("details"));

    let out = output(|buf| cmd_list(&repo, false, false, buf).unwrap());
    assert!(out.contains("1: Test Task"));
}

#[test]
fn test_add_rejects_blank_name() {
    let repo = repo();
    let mut buf = Vec::new();
    let err = cmd_add(&repo, "   ", None, &mut buf).unwrap_err();
    assert!(matches!(err, TodoError::Usage(_)));
    assert_eq!(repo.store().round_trips(), 0);
}

#[test]
fn test_add_drops_blank_description() {
    let repo = repo();
    let mut buf = Vec::new();
    cmd_add(&repo, "Task", Some("  ".into()), &mut buf).unwrap();
    assert_eq!(repo.list_all().unwrap()[0].description, None);
}

#[test]
fn test_list_empty_prints_message() {
    let repo = repo();
    let out = output(|buf| cmd_list(&repo, false, false, buf).unwrap());
    assert_eq!(out.trim_end(), EMPTY_LIST_MESSAGE);

    let out = output(|buf| cmd_list(&repo, true, false, buf).unwrap());
    assert_eq!(out.trim_end(), EMPTY_LIST_MESSAGE);
}

#[test]
fn test_list_numbers_tasks_from_one() {
    let repo = repo();
    repo.create("first", None).unwrap();
    repo.create("second", None).unwrap();

    let out = output(|buf| cmd_list(&repo, false, false, buf).unwrap());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "1: first");
    assert_eq!(lines[1], "2: second");
}

#[test]
fn test_list_long_shows_table() {
    let repo = repo();
    repo.create("buy milk", Some("2%".into())).unwrap();
    repo.create("walk dog", None).unwrap();
    repo.complete_by_name("buy milk").unwrap();

    let out = output(|buf| cmd_list(&repo, true, false, buf).unwrap());
    assert!(out.contains("Description"));
    assert!(out.contains("buy milk"));
    assert!(out.contains("2%"));
    assert!(out.contains("Done"));
    assert!(out.contains("Pending"));
}

#[test]
fn test_list_propagates_read_errors() {
    let repo = repo();
    repo.create("a", None).unwrap();
    repo.store().set_simulate_read_error(true);

    let mut buf = Vec::new();
    let err = cmd_list(&repo, false, false, &mut buf).unwrap_err();
    assert!(matches!(err, TodoError::StoreRead(_)));
    assert!(buf.is_empty());
}

#[test]
fn test_complete_task() {
    let repo = repo();
    repo.create("Task to complete", None).unwrap();

    let out = output(|buf| cmd_complete(&repo, "Task to complete", buf).unwrap());
    assert!(out.contains("marked as complete"));
    assert!(repo.list_all().unwrap()[0].completed);
}

#[test]
fn test_complete_missing_task() {
    let repo = repo();
    let mut buf = Vec::new();
    let err = cmd_complete(&repo, "ghost", &mut buf).unwrap_err();
    assert!(matches!(err, TodoError::NotFound(_)));
}

#[test]
fn test_delete_task() {
    let repo = repo();
    repo.create("Task to delete", None).unwrap();

    let out = output(|buf| cmd_delete(&repo, "Task to delete", buf).unwrap());
    assert!(out.contains("Task 'Task to delete' deleted."));
    assert!(matches!(repo.list_all(), Err(TodoError::EmptyResult)));
}

#[test]
fn test_delete_missing_task() {
    let repo = repo();
    repo.create("other", None).unwrap();

    let mut buf = Vec::new();
    let err = cmd_delete(&repo, "ghost", &mut buf).unwrap_err();
    assert_eq!(err.to_string(), "No task named 'ghost'");
    assert_eq!(repo.list_all().unwrap().len(), 1);
}
