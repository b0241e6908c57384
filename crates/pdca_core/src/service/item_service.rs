//! PDCA item use-case service.
//!
//! # Responsibility
//! - Provide the stable entry points the dashboard calls per user action.
//! - Wire CSV parsing into transactional bulk append.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::import::csv::{parse_pdca_csv, ImportError};
use crate::model::item::{ItemId, PdcaDraft, PdcaItem};
use crate::repo::item_repo::{ItemRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for item use-cases.
#[derive(Debug)]
pub enum PdcaServiceError {
    /// Target item does not exist.
    ItemNotFound(ItemId),
    /// Upload text failed to parse; nothing was written.
    Import(ImportError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for PdcaServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ItemNotFound(id) => write!(f, "pdca item not found: {id}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PdcaServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ItemNotFound(_) => None,
            Self::Import(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for PdcaServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ItemNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<ImportError> for PdcaServiceError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

/// Use-case facade over repository implementations.
pub struct PdcaService<R: ItemRepository> {
    repo: R,
}

impl<R: ItemRepository> PdcaService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new item and returns the assigned id.
    pub fn add_item(&self, draft: &PdcaDraft) -> Result<ItemId, PdcaServiceError> {
        Ok(self.repo.insert(draft)?)
    }

    /// Gets one item by id.
    pub fn get_item(&self, id: ItemId) -> Result<Option<PdcaItem>, PdcaServiceError> {
        Ok(self.repo.get(id)?)
    }

    /// Full-table snapshot, ordered by id.
    pub fn list_items(&self) -> Result<Vec<PdcaItem>, PdcaServiceError> {
        Ok(self.repo.list_all()?)
    }

    /// Overwrites all non-id fields of an existing item.
    pub fn update_item(&self, item: &PdcaItem) -> Result<(), PdcaServiceError> {
        Ok(self.repo.update(item)?)
    }

    /// Removes one item by id.
    pub fn delete_item(&self, id: ItemId) -> Result<(), PdcaServiceError> {
        Ok(self.repo.delete(id)?)
    }

    /// Parses uploaded CSV text and appends every row in one transaction.
    ///
    /// Returns the assigned ids in file order. A parse error rejects the
    /// whole upload before any write.
    pub fn import_csv(&self, content: &str) -> Result<Vec<ItemId>, PdcaServiceError> {
        let drafts = match parse_pdca_csv(content) {
            Ok(drafts) => drafts,
            Err(err) => {
                warn!("event=csv_import module=service status=rejected error={err}");
                return Err(err.into());
            }
        };

        if drafts.is_empty() {
            info!("event=csv_import module=service status=ok rows=0");
            return Ok(Vec::new());
        }

        let ids = self.repo.bulk_append(&drafts)?;
        info!(
            "event=csv_import module=service status=ok rows={}",
            ids.len()
        );
        Ok(ids)
    }
}
