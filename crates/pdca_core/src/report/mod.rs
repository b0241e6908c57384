//! Read-side reporting over item snapshots.
//!
//! # Responsibility
//! - Compute group-by-count aggregates for the dashboard charts.
//! - Stay pure: reporting never touches storage, only snapshots.

pub mod aggregate;
