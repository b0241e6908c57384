//! Core domain logic for the APQP PDCA task-tracking dashboard.
//! This crate is the single source of truth for record invariants.

pub mod access;
pub mod db;
pub mod import;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;

pub use access::{Role, RoleSecrets};
pub use import::csv::{parse_pdca_csv, ImportError, ImportResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{
    ItemId, ItemStatus, ItemValidationError, PdcaDraft, PdcaItem, Remarks, MAX_DRI_CHARS,
};
pub use report::aggregate::{
    aggregate, status_breakdown, tasks_per_dri, GroupCount, GroupField, GroupFilter,
};
pub use repo::item_repo::{ItemRepository, RepoError, RepoResult, SqliteItemRepository};
pub use service::item_service::{PdcaService, PdcaServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
