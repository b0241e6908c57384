//! PDCA item domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its categorical enums.
//! - Provide write-path validation shared by insert, update and import.
//!
//! # Invariants
//! - `id` is assigned by the storage engine and never chosen by callers.
//! - Enum wire text ("Open", "On-going", ...) matches the stored and
//!   imported data exactly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned identifier for a PDCA item.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ItemId = i64;

/// Maximum accepted length of the DRI field, in characters.
pub const MAX_DRI_CHARS: usize = 20;

/// Open/closed lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    Open,
    Closed,
}

impl ItemStatus {
    /// Stable text used for storage, import and serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Open" => Some(Self::Open),
            "Closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress annotation of a task, tracked separately from [`ItemStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Remarks {
    #[serde(rename = "On-going")]
    OnGoing,
    Complete,
    Delay,
}

impl Remarks {
    /// Stable text used for storage, import and serialization.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnGoing => "On-going",
            Self::Complete => "Complete",
            Self::Delay => "Delay",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "On-going" => Some(Self::OnGoing),
            "Complete" => Some(Self::Complete),
            "Delay" => Some(Self::Delay),
            _ => None,
        }
    }
}

impl Display for Remarks {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation error for item write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    /// DRI exceeds [`MAX_DRI_CHARS`] characters.
    DriTooLong { length: usize },
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DriTooLong { length } => write!(
                f,
                "dri exceeds {MAX_DRI_CHARS} characters (got {length})"
            ),
        }
    }
}

impl Error for ItemValidationError {}

/// Input shape for a new item: every field except the storage-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdcaDraft {
    /// Free text, may be empty.
    pub task: String,
    /// Car maker/model the task belongs to.
    pub car_model: String,
    /// Directly responsible individual.
    pub dri: String,
    pub start_date: NaiveDate,
    /// Target end date. No ordering against `start_date` is enforced.
    pub end_date: NaiveDate,
    pub status: ItemStatus,
    pub remarks: Remarks,
}

impl PdcaDraft {
    /// Checks write-path invariants; storage must not persist a failing draft.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        let length = self.dri.chars().count();
        if length > MAX_DRI_CHARS {
            return Err(ItemValidationError::DriTooLong { length });
        }
        Ok(())
    }
}

/// Persisted PDCA record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdcaItem {
    pub id: ItemId,
    pub task: String,
    pub car_model: String,
    pub dri: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ItemStatus,
    pub remarks: Remarks,
}

impl PdcaItem {
    /// Combines a storage-assigned id with draft fields.
    pub fn from_draft(id: ItemId, draft: PdcaDraft) -> Self {
        Self {
            id,
            task: draft.task,
            car_model: draft.car_model,
            dri: draft.dri,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: draft.status,
            remarks: draft.remarks,
        }
    }

    /// Same write-path invariants as [`PdcaDraft::validate`].
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        let length = self.dri.chars().count();
        if length > MAX_DRI_CHARS {
            return Err(ItemValidationError::DriTooLong { length });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemStatus, Remarks};

    #[test]
    fn status_text_roundtrips() {
        for status in [ItemStatus::Open, ItemStatus::Closed] {
            assert_eq!(ItemStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ItemStatus::parse("open"), None);
    }

    #[test]
    fn remarks_text_roundtrips() {
        for remarks in [Remarks::OnGoing, Remarks::Complete, Remarks::Delay] {
            assert_eq!(Remarks::parse(remarks.as_str()), Some(remarks));
        }
        assert_eq!(Remarks::parse("Ongoing"), None);
    }
}
