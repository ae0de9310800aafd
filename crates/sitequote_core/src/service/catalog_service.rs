//! Site/quotation catalog use-case service.
//!
//! # Responsibility
//! - Compose the two repositories into the calls the view layer makes.
//! - Parse raw route identifiers into typed ids.
//! - Enforce quotation -> site referential integrity at write time.
//!
//! # Invariants
//! - Repositories never call each other; only this service composes them.
//! - Service APIs never bypass repository validation.
//! - Errors are returned unchanged; no retries happen here.

use crate::model::ids::{QuotationId, SiteId};
use crate::model::quotation::{Quotation, QuotationInput};
use crate::model::site::{Site, SiteInput};
use crate::model::validation::{FieldError, FieldProblem, ValidationError};
use crate::repo::quotation_repo::QuotationRepository;
use crate::repo::site_repo::SiteRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use serde::Serialize;

/// A site together with the quotations that reference it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteDetails {
    pub site: Site,
    pub quotations: Vec<Quotation>,
}

/// Catalog facade over site and quotation repositories.
pub struct CatalogService<S: SiteRepository, Q: QuotationRepository> {
    sites: S,
    quotations: Q,
}

impl<S: SiteRepository, Q: QuotationRepository> CatalogService<S, Q> {
    /// Creates a service over the provided repository implementations.
    pub fn new(sites: S, quotations: Q) -> Self {
        Self { sites, quotations }
    }

    /// Lists all sites in insertion order.
    pub async fn list_sites(&self) -> Vec<Site> {
        self.sites.list_sites().await
    }

    /// Gets one site from its route form (`"3"`).
    pub async fn get_site(&self, raw_site_id: &str) -> RepoResult<Site> {
        let site_id = SiteId::parse(raw_site_id).map_err(|err| {
            warn!("event=site_get module=service status=invalid_argument");
            RepoError::from(err)
        })?;
        self.sites.get_site_by_id(site_id).await
    }

    /// Adds a site and returns it with its assigned id.
    pub async fn add_site(&self, candidate: &SiteInput) -> RepoResult<Site> {
        self.sites.add_site(candidate).await
    }

    /// Lists every quotation in insertion order.
    pub async fn list_quotations(&self) -> Vec<Quotation> {
        self.quotations.list_quotations().await
    }

    /// Lists quotations of one site; unknown sites yield an empty list.
    pub async fn list_quotations_by_site(&self, raw_site_id: &str) -> RepoResult<Vec<Quotation>> {
        let site_id = SiteId::parse(raw_site_id).map_err(|err| {
            warn!("event=quotation_list module=service status=invalid_argument");
            RepoError::from(err)
        })?;
        Ok(self.quotations.list_quotations_by_site(site_id).await)
    }

    /// Gets one quotation from its route form.
    pub async fn get_quotation(&self, raw_quotation_id: &str) -> RepoResult<Quotation> {
        let quotation_id = QuotationId::parse(raw_quotation_id).map_err(|err| {
            warn!("event=quotation_get module=service status=invalid_argument");
            RepoError::from(err)
        })?;
        self.quotations.get_quotation_by_id(&quotation_id).await
    }

    /// Adds a quotation after checking its site exists.
    ///
    /// # Errors
    /// - `Validation` with field `site_id` / `UnknownReference` when the
    ///   referenced site is not stored, alongside any other field problems.
    /// - Any validation error from the quotation repository.
    pub async fn add_quotation(&self, candidate: &QuotationInput) -> RepoResult<Quotation> {
        if let Some(site_id) = candidate.site_id {
            match self.sites.get_site_by_id(site_id).await {
                Ok(_) => {}
                Err(RepoError::NotFound(_)) => {
                    warn!(
                        "event=quotation_add module=service status=rejected reason=unknown_site site_id={site_id}"
                    );
                    let mut err = candidate
                        .validate()
                        .err()
                        .unwrap_or(ValidationError { fields: Vec::new() });
                    err.fields.insert(
                        0,
                        FieldError {
                            field: "site_id".to_string(),
                            problem: FieldProblem::UnknownReference,
                        },
                    );
                    return Err(err.into());
                }
                Err(other) => return Err(other),
            }
        }
        // Sites are never removed, so the check above still holds at insert time.
        self.quotations.add_quotation(candidate).await
    }

    /// Loads a site and then its quotations.
    pub async fn site_details(&self, raw_site_id: &str) -> RepoResult<SiteDetails> {
        let site = self.get_site(raw_site_id).await?;
        let quotations = self
            .quotations
            .list_quotations_by_site(site.site_id)
            .await;
        info!(
            "event=site_details module=service status=ok site_id={} quotations={}",
            site.site_id,
            quotations.len()
        );
        Ok(SiteDetails { site, quotations })
    }
}
