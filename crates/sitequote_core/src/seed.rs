//! Fixture loading for demo and test catalogs.
//!
//! # Responsibility
//! - Parse JSON fixtures of sites and quotations.
//! - Insert them through the catalog so normal validation applies.
//!
//! # Invariants
//! - Fixture `site_id` values are local to the file; stored sites get
//!   repository-assigned ids and quotations are re-pointed accordingly.
//! - Seeding stops at the first failing record; earlier records stay.

use crate::model::ids::{QuotationId, SiteId};
use crate::model::quotation::QuotationInput;
use crate::model::site::{Address, SiteInput, SiteType};
use crate::repo::quotation_repo::QuotationRepository;
use crate::repo::site_repo::SiteRepository;
use crate::repo::RepoError;
use crate::service::catalog_service::CatalogService;
use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Built-in fixture used by `--demo`.
pub const DEMO_FIXTURE: &str = include_str!("../fixtures/demo.json");

/// Error returned while loading or applying a fixture.
#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A quotation points at a `site_id` the fixture never declared.
    UnknownFixtureSite { fixture_site_id: u64 },
    /// Two fixture sites share the same `site_id`.
    DuplicateFixtureSite { fixture_site_id: u64 },
    Repo(RepoError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read fixture: {err}"),
            Self::Parse(err) => write!(f, "invalid fixture json: {err}"),
            Self::UnknownFixtureSite { fixture_site_id } => write!(
                f,
                "fixture quotation references undeclared site_id {fixture_site_id}"
            ),
            Self::DuplicateFixtureSite { fixture_site_id } => {
                write!(f, "fixture declares site_id {fixture_site_id} twice")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::UnknownFixtureSite { .. } | Self::DuplicateFixtureSite { .. } => None,
        }
    }
}

impl From<std::io::Error> for SeedError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<RepoError> for SeedError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureSite {
    pub site_id: u64,
    pub name: String,
    pub address: Address,
    pub site_type: SiteType,
    #[serde(default)]
    pub risks: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureQuotation {
    /// Numbers and text are both accepted.
    #[serde(default)]
    pub quotation_id: Option<QuotationId>,
    pub site_id: u64,
    pub product_name: String,
    pub height: f64,
    pub width: f64,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Parsed fixture file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub sites: Vec<FixtureSite>,
    pub quotations: Vec<FixtureQuotation>,
}

impl Fixture {
    pub fn from_json_str(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(json.as_str())
    }

    pub fn demo() -> Result<Self, SeedError> {
        Self::from_json_str(DEMO_FIXTURE)
    }
}

/// Counts of records inserted by `seed_catalog`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub sites: usize,
    pub quotations: usize,
}

/// Inserts every fixture record through `catalog`, sites first.
pub async fn seed_catalog<S, Q>(
    catalog: &CatalogService<S, Q>,
    fixture: &Fixture,
) -> Result<SeedReport, SeedError>
where
    S: SiteRepository,
    Q: QuotationRepository,
{
    let mut assigned: HashMap<u64, SiteId> = HashMap::with_capacity(fixture.sites.len());

    for fixture_site in &fixture.sites {
        if assigned.contains_key(&fixture_site.site_id) {
            return Err(SeedError::DuplicateFixtureSite {
                fixture_site_id: fixture_site.site_id,
            });
        }
        let input = SiteInput::new(
            fixture_site.name.clone(),
            fixture_site.address.clone(),
            fixture_site.site_type,
            fixture_site.risks.clone(),
        );
        let site = catalog.add_site(&input).await?;
        assigned.insert(fixture_site.site_id, site.site_id);
    }

    for fixture_quotation in &fixture.quotations {
        let site_id = assigned
            .get(&fixture_quotation.site_id)
            .copied()
            .ok_or(SeedError::UnknownFixtureSite {
                fixture_site_id: fixture_quotation.site_id,
            })?;
        let input = QuotationInput {
            quotation_id: fixture_quotation
                .quotation_id
                .as_ref()
                .map(ToString::to_string),
            site_id: Some(site_id),
            product_name: Some(fixture_quotation.product_name.clone()),
            height: Some(fixture_quotation.height),
            width: Some(fixture_quotation.width),
            quantity: fixture_quotation.quantity,
        };
        catalog.add_quotation(&input).await?;
    }

    let report = SeedReport {
        sites: fixture.sites.len(),
        quotations: fixture.quotations.len(),
    };
    info!(
        "event=seed module=seed status=ok sites={} quotations={}",
        report.sites, report.quotations
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::Fixture;

    #[test]
    fn demo_fixture_parses() {
        let fixture = Fixture::demo().unwrap();
        assert_eq!(fixture.sites.len(), 3);
        assert_eq!(fixture.quotations.len(), 3);
        assert_eq!(
            fixture.quotations[0]
                .quotation_id
                .as_ref()
                .map(|id| id.as_str()),
            Some("1")
        );
    }

    #[test]
    fn empty_object_is_an_empty_fixture() {
        let fixture = Fixture::from_json_str("{}").unwrap();
        assert!(fixture.sites.is_empty());
        assert!(fixture.quotations.is_empty());
    }
}
