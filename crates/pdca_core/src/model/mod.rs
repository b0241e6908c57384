//! Domain model for PDCA task records.
//!
//! # Responsibility
//! - Define the canonical record shape shared by storage, import and
//!   reporting.
//!
//! # Invariants
//! - Every persisted record is identified by a storage-assigned integer id.
//! - Status and remarks values are closed enums with stable wire text.

pub mod item;
