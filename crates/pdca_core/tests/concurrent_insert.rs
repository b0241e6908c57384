use chrono::NaiveDate;
use pdca_core::db::open_db;
use pdca_core::{ItemRepository, ItemStatus, PdcaDraft, Remarks, SqliteItemRepository};
use std::collections::HashSet;
use std::thread;

const WRITERS: usize = 2;
const INSERTS_PER_WRITER: usize = 25;

#[test]
fn concurrent_inserts_never_duplicate_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pdca.db");

    // Migrate up front so the writers race on inserts only.
    drop(open_db(&path).unwrap());

    let mut handles = Vec::new();
    for writer in 0..WRITERS {
        let path = path.clone();
        handles.push(thread::spawn(move || {
            let conn = open_db(&path).unwrap();
            let repo = SqliteItemRepository::try_new(&conn).unwrap();
            let mut ids = Vec::new();
            for n in 0..INSERTS_PER_WRITER {
                let task = format!("writer {writer} task {n}");
                ids.push(repo.insert(&draft(&task)).unwrap());
            }
            ids
        }));
    }

    let mut all_ids = Vec::new();
    for handle in handles {
        all_ids.extend(handle.join().unwrap());
    }

    assert_eq!(all_ids.len(), WRITERS * INSERTS_PER_WRITER);
    let unique: HashSet<_> = all_ids.iter().copied().collect();
    assert_eq!(unique.len(), all_ids.len(), "duplicate ids were assigned");

    let conn = open_db(&path).unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    let stored: Vec<_> = repo.list_all().unwrap();
    assert_eq!(stored.len(), WRITERS * INSERTS_PER_WRITER);

    let stored_ids: HashSet<_> = stored.iter().map(|item| item.id).collect();
    assert_eq!(stored_ids, unique);
}

fn draft(task: &str) -> PdcaDraft {
    PdcaDraft {
        task: task.to_string(),
        car_model: "Model X".to_string(),
        dri: "Writer".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
        status: ItemStatus::Open,
        remarks: Remarks::OnGoing,
    }
}
