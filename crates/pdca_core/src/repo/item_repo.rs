//! PDCA item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `pdca` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate before SQL mutations.
//! - Ids are assigned by SQLite's rowid identity inside the INSERT itself,
//!   so concurrent writers cannot mint the same id.
//! - `bulk_append` is all-or-nothing: one transaction covers the whole
//!   batch.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::item::{ItemId, ItemStatus, ItemValidationError, PdcaDraft, PdcaItem, Remarks};
use log::info;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    task,
    car_model,
    dri,
    start_date,
    end_date,
    status,
    remarks
FROM pdca";

const ITEM_INSERT_SQL: &str = "INSERT INTO pdca (
    task,
    car_model,
    dri,
    start_date,
    end_date,
    status,
    remarks
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for item persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ItemValidationError),
    Db(DbError),
    NotFound(ItemId),
    InvalidData(String),
    /// Connection has no applied migrations; open it via `db::open_db`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "pdca item not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted pdca data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is not migrated (expected {expected_version})"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` does not exist")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ItemValidationError> for RepoError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for PDCA item CRUD operations.
pub trait ItemRepository {
    /// Persists a new item and returns the storage-assigned id.
    fn insert(&self, draft: &PdcaDraft) -> RepoResult<ItemId>;
    /// Overwrites all non-id fields of the row matching `item.id`.
    fn update(&self, item: &PdcaItem) -> RepoResult<()>;
    fn get(&self, id: ItemId) -> RepoResult<Option<PdcaItem>>;
    /// Full-table read ordered by id.
    fn list_all(&self) -> RepoResult<Vec<PdcaItem>>;
    fn delete(&self, id: ItemId) -> RepoResult<()>;
    /// Appends a batch in one transaction, assigning sequential fresh ids.
    fn bulk_append(&self, drafts: &[PdcaDraft]) -> RepoResult<Vec<ItemId>>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// Rejects connections that were not opened through `db::open_db`, so
    /// repository SQL never runs against a missing or stale schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version == 0 {
            return Err(RepoError::UninitializedConnection {
                expected_version: latest_version(),
                actual_version,
            });
        }

        if !table_exists(conn, "pdca")? {
            return Err(RepoError::MissingRequiredTable("pdca"));
        }

        Ok(Self { conn })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn insert(&self, draft: &PdcaDraft) -> RepoResult<ItemId> {
        draft.validate()?;

        self.conn.execute(
            ITEM_INSERT_SQL,
            params![
                draft.task.as_str(),
                draft.car_model.as_str(),
                draft.dri.as_str(),
                draft.start_date,
                draft.end_date,
                draft.status.as_str(),
                draft.remarks.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, item: &PdcaItem) -> RepoResult<()> {
        item.validate()?;

        let changed = self.conn.execute(
            "UPDATE pdca
             SET
                task = ?1,
                car_model = ?2,
                dri = ?3,
                start_date = ?4,
                end_date = ?5,
                status = ?6,
                remarks = ?7
             WHERE id = ?8;",
            params![
                item.task.as_str(),
                item.car_model.as_str(),
                item.dri.as_str(),
                item.start_date,
                item.end_date,
                item.status.as_str(),
                item.remarks.as_str(),
                item.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(item.id));
        }

        Ok(())
    }

    fn get(&self, id: ItemId) -> RepoResult<Option<PdcaItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }

        Ok(None)
    }

    fn list_all(&self) -> RepoResult<Vec<PdcaItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn delete(&self, id: ItemId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM pdca WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn bulk_append(&self, drafts: &[PdcaDraft]) -> RepoResult<Vec<ItemId>> {
        for draft in drafts {
            draft.validate()?;
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut ids = Vec::with_capacity(drafts.len());
        {
            let mut stmt = tx.prepare(ITEM_INSERT_SQL)?;
            for draft in drafts {
                stmt.execute(params![
                    draft.task.as_str(),
                    draft.car_model.as_str(),
                    draft.dri.as_str(),
                    draft.start_date,
                    draft.end_date,
                    draft.status.as_str(),
                    draft.remarks.as_str(),
                ])?;
                ids.push(tx.last_insert_rowid());
            }
        }
        tx.commit()?;

        info!(
            "event=bulk_append module=repo status=ok rows={}",
            ids.len()
        );
        Ok(ids)
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<PdcaItem> {
    let status_text: String = row.get("status")?;
    let status = ItemStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in pdca.status"))
    })?;

    let remarks_text: String = row.get("remarks")?;
    let remarks = Remarks::parse(&remarks_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid remarks `{remarks_text}` in pdca.remarks"))
    })?;

    // Rows written by older tooling may carry an over-length dri; reads
    // accept them, only write paths enforce the limit.
    Ok(PdcaItem {
        id: row.get("id")?,
        task: row.get("task")?,
        car_model: row.get("car_model")?,
        dri: row.get("dri")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        status,
        remarks,
    })
}

fn table_exists(conn: &Connection, table_name: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
