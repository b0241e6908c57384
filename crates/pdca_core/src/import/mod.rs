//! Bulk import of existing PDCA data.
//!
//! # Responsibility
//! - Parse uploaded comma-separated text into item drafts.
//! - Surface per-line errors before anything touches storage.

pub mod csv;
