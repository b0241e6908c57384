use chrono::NaiveDate;
use pdca_core::db::migrations::latest_version;
use pdca_core::db::open_db_in_memory;
use pdca_core::{
    ItemRepository, ItemStatus, PdcaDraft, PdcaItem, PdcaService, PdcaServiceError, Remarks,
    RepoError, SqliteItemRepository,
};
use rusqlite::Connection;

#[test]
fn inserting_into_empty_table_yields_sequential_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let ids: Vec<_> = (0..4)
        .map(|n| repo.insert(&draft(&format!("task {n}"), "Alice")).unwrap())
        .collect();

    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn insert_then_read_back_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let mut input = draft("Fix weld fixture", "Alice");
    input.car_model = "Model A".to_string();
    input.status = ItemStatus::Closed;
    input.remarks = Remarks::Delay;

    let id = repo.insert(&input).unwrap();
    let loaded = repo.get(id).unwrap().unwrap();

    assert_eq!(loaded, PdcaItem::from_draft(id, input));
}

#[test]
fn get_missing_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    assert!(repo.get(42).unwrap().is_none());
}

#[test]
fn update_changes_only_the_target_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let first_id = repo.insert(&draft("first", "Alice")).unwrap();
    let second_id = repo.insert(&draft("second", "Bob")).unwrap();

    let mut edited = repo.get(first_id).unwrap().unwrap();
    edited.task = "first (reworked)".to_string();
    edited.dri = "Carol".to_string();
    edited.status = ItemStatus::Closed;
    edited.remarks = Remarks::Complete;
    edited.end_date = date(2026, 6, 30);
    repo.update(&edited).unwrap();

    let reloaded = repo.get(first_id).unwrap().unwrap();
    assert_eq!(reloaded, edited);

    let untouched = repo.get(second_id).unwrap().unwrap();
    assert_eq!(untouched, PdcaItem::from_draft(second_id, draft("second", "Bob")));
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let missing = PdcaItem::from_draft(99, draft("ghost", "Alice"));
    let err = repo.update(&missing).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));
}

#[test]
fn delete_removes_exactly_one_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let keep_id = repo.insert(&draft("keep", "Alice")).unwrap();
    let drop_id = repo.insert(&draft("drop", "Bob")).unwrap();

    repo.delete(drop_id).unwrap();

    let remaining = repo.list_all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep_id);
}

#[test]
fn delete_not_found_leaves_table_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    repo.insert(&draft("only", "Alice")).unwrap();

    let err = repo.delete(99).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn over_length_dri_is_rejected_on_every_write_path() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let long_dri = "x".repeat(21);
    let invalid = draft("task", &long_dri);

    let insert_err = repo.insert(&invalid).unwrap_err();
    assert!(matches!(insert_err, RepoError::Validation(_)));

    let id = repo.insert(&draft("task", "Alice")).unwrap();
    let mut edited = repo.get(id).unwrap().unwrap();
    edited.dri = long_dri.clone();
    let update_err = repo.update(&edited).unwrap_err();
    assert!(matches!(update_err, RepoError::Validation(_)));

    let bulk_err = repo
        .bulk_append(&[draft("ok", "Bob"), invalid])
        .unwrap_err();
    assert!(matches!(bulk_err, RepoError::Validation(_)));

    // The rejected batch must not have written its valid rows either.
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn bulk_append_continues_from_current_max_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    for n in 0..5 {
        repo.insert(&draft(&format!("seed {n}"), "Alice")).unwrap();
    }

    let ids = repo
        .bulk_append(&[draft("uploaded 1", "Bob"), draft("uploaded 2", "Carol")])
        .unwrap();

    assert_eq!(ids, vec![6, 7]);
    assert_eq!(repo.list_all().unwrap().len(), 7);
}

#[test]
fn bulk_append_empty_batch_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let ids = repo.bulk_append(&[]).unwrap();
    assert!(ids.is_empty());
    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
fn list_all_is_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    for n in 0..3 {
        repo.insert(&draft(&format!("task {n}"), "Alice")).unwrap();
    }

    let ids: Vec<_> = repo.list_all().unwrap().into_iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    let service = PdcaService::new(repo);

    let id = service.add_item(&draft("from service", "Alice")).unwrap();
    let fetched = service.get_item(id).unwrap().unwrap();
    assert_eq!(fetched.task, "from service");

    let mut edited = fetched.clone();
    edited.remarks = Remarks::Complete;
    service.update_item(&edited).unwrap();
    assert_eq!(service.list_items().unwrap().len(), 1);

    service.delete_item(id).unwrap();
    assert!(service.list_items().unwrap().is_empty());

    let err = service.delete_item(id).unwrap_err();
    assert!(matches!(err, PdcaServiceError::ItemNotFound(missing) if missing == id));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteItemRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_pdca_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteItemRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("pdca"))));
}

fn draft(task: &str, dri: &str) -> PdcaDraft {
    PdcaDraft {
        task: task.to_string(),
        car_model: "Model X".to_string(),
        dri: dri.to_string(),
        start_date: date(2026, 1, 5),
        end_date: date(2026, 2, 28),
        status: ItemStatus::Open,
        remarks: Remarks::OnGoing,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
