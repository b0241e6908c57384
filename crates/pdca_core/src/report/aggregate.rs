//! Group-by-count aggregation for chart data.
//!
//! # Responsibility
//! - Count items per pair of categorical field values, with an optional
//!   single-field equality filter.
//! - Provide the two chart projections the dashboard renders.
//!
//! # Invariants
//! - Result ordering is deterministic: ascending by (primary, secondary)
//!   group key.
//! - Aggregation operates on snapshots and never mutates them.

use crate::model::item::PdcaItem;
use std::collections::BTreeMap;

/// Categorical item fields a chart can group or filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    CarModel,
    Dri,
    Status,
    Remarks,
}

impl GroupField {
    /// Returns the item's value for this field.
    pub fn value_of(self, item: &PdcaItem) -> &str {
        match self {
            Self::CarModel => item.car_model.as_str(),
            Self::Dri => item.dri.as_str(),
            Self::Status => item.status.as_str(),
            Self::Remarks => item.remarks.as_str(),
        }
    }
}

/// Single-field equality filter applied before grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFilter {
    pub field: GroupField,
    pub value: String,
}

impl GroupFilter {
    pub fn new(field: GroupField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// One aggregated bar: a pair of group values and the item count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub primary: String,
    pub secondary: String,
    pub count: usize,
}

/// Counts items per (primary, secondary) group after the optional filter.
pub fn aggregate(
    items: &[PdcaItem],
    group_by: (GroupField, GroupField),
    filter: Option<&GroupFilter>,
) -> Vec<GroupCount> {
    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();

    for item in items {
        if let Some(filter) = filter {
            if filter.field.value_of(item) != filter.value {
                continue;
            }
        }
        let key = (
            group_by.0.value_of(item).to_string(),
            group_by.1.value_of(item).to_string(),
        );
        *counts.entry(key).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((primary, secondary), count)| GroupCount {
            primary,
            secondary,
            count,
        })
        .collect()
}

/// Editor dashboard chart: task count per DRI, split by remarks,
/// optionally narrowed to one car model.
pub fn tasks_per_dri(items: &[PdcaItem], car_model: Option<&str>) -> Vec<GroupCount> {
    let filter = car_model.map(|value| GroupFilter::new(GroupField::CarModel, value));
    aggregate(items, (GroupField::Dri, GroupField::Remarks), filter.as_ref())
}

/// Viewer chart: one DRI's items counted per (status, remarks), optionally
/// narrowed to one car model.
pub fn status_breakdown(
    items: &[PdcaItem],
    dri: &str,
    car_model: Option<&str>,
) -> Vec<GroupCount> {
    let mine: Vec<PdcaItem> = items
        .iter()
        .filter(|item| item.dri == dri)
        .cloned()
        .collect();
    let filter = car_model.map(|value| GroupFilter::new(GroupField::CarModel, value));
    aggregate(&mine, (GroupField::Status, GroupField::Remarks), filter.as_ref())
}
