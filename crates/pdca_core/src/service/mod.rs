//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and import calls into use-case level APIs.
//! - Keep the presentation layer decoupled from storage details.

pub mod item_service;
