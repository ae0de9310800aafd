//! Domain model for sites and their quotations.
//!
//! # Responsibility
//! - Define canonical record shapes and add-form inputs.
//! - Own identifier parsing and field validation rules.
//!
//! # Invariants
//! - Each entity has exactly one identifier type.
//! - Sites and quotations relate by `SiteId` only, never by reference.

pub mod ids;
pub mod quotation;
pub mod site;
pub mod validation;
