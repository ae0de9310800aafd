//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the catalog operations the view
//!   layer invokes.
//! - Keep view/CLI layers decoupled from repository details.

pub mod catalog_service;
