//! Core domain logic for site and quotation management.
//! This crate is the single source of truth for catalog invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod view;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::ids::{IdError, QuotationId, SiteId};
pub use model::quotation::{Quotation, QuotationInput, DEFAULT_QUANTITY};
pub use model::site::{parse_risk_labels, Address, AddressInput, Site, SiteInput, SiteType};
pub use model::validation::{FieldError, FieldProblem, ValidationError};
pub use repo::quotation_repo::{InMemoryQuotationRepository, QuotationRepository};
pub use repo::site_repo::{InMemorySiteRepository, SiteRepository};
pub use repo::{RecordRef, RepoError, RepoResult};
pub use seed::{seed_catalog, Fixture, SeedError, SeedReport};
pub use service::catalog_service::{CatalogService, SiteDetails};
pub use view::LoadState;

/// Catalog wired to the in-memory repositories.
pub type InMemoryCatalog = CatalogService<InMemorySiteRepository, InMemoryQuotationRepository>;

/// Builds an empty in-memory catalog using the configured latency.
pub fn in_memory_catalog(config: &AppConfig) -> InMemoryCatalog {
    CatalogService::new(
        InMemorySiteRepository::with_latency(config.latency()),
        InMemoryQuotationRepository::with_latency(config.latency()),
    )
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
