//! Fallback view state for screens backed by the catalog service.
//!
//! # Responsibility
//! - Turn catalog results into a state a screen can always render.
//! - Log the underlying failure once, without user-entered text.
//!
//! # Invariants
//! - Loaders never propagate repository errors and never panic.
//! - `Failed` messages are generic and stable; details stay in the log.

use crate::model::quotation::Quotation;
use crate::model::site::Site;
use crate::repo::quotation_repo::QuotationRepository;
use crate::repo::site_repo::SiteRepository;
use crate::repo::RepoResult;
use crate::service::catalog_service::{CatalogService, SiteDetails};
use log::warn;
use serde::Serialize;

pub const SITE_FAILED: &str = "Failed to fetch site";
pub const SITE_DETAILS_FAILED: &str = "Failed to fetch site details";
pub const QUOTATION_FAILED: &str = "Failed to fetch quotation details";
pub const SITE_QUOTATIONS_FAILED: &str = "Failed to fetch site quotations";

/// What a screen renders once its data call settles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum LoadState<T> {
    Ready(T),
    Failed { message: String },
}

impl<T> LoadState<T> {
    /// Maps a catalog result; errors become `Failed { message }`.
    pub fn from_result(result: RepoResult<T>, screen: &str, message: &str) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => {
                warn!(
                    "event=view_load module=view status=error screen={screen} kind={}",
                    err.kind()
                );
                Self::Failed {
                    message: message.to_string(),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }

    /// Message to show for the failed state.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Failed { message } => Some(message.as_str()),
        }
    }
}

/// Sites list screen. Listing cannot fail, so this is always `Ready`.
pub async fn load_sites<S, Q>(catalog: &CatalogService<S, Q>) -> LoadState<Vec<Site>>
where
    S: SiteRepository,
    Q: QuotationRepository,
{
    LoadState::Ready(catalog.list_sites().await)
}

/// Single site header without its quotations.
pub async fn load_site<S, Q>(catalog: &CatalogService<S, Q>, raw_site_id: &str) -> LoadState<Site>
where
    S: SiteRepository,
    Q: QuotationRepository,
{
    LoadState::from_result(catalog.get_site(raw_site_id).await, "site", SITE_FAILED)
}

/// Site details screen: the site and its quotations.
pub async fn load_site_details<S, Q>(
    catalog: &CatalogService<S, Q>,
    raw_site_id: &str,
) -> LoadState<SiteDetails>
where
    S: SiteRepository,
    Q: QuotationRepository,
{
    LoadState::from_result(
        catalog.site_details(raw_site_id).await,
        "site_details",
        SITE_DETAILS_FAILED,
    )
}

/// Quotations of one site without the site header.
pub async fn load_site_quotations<S, Q>(
    catalog: &CatalogService<S, Q>,
    raw_site_id: &str,
) -> LoadState<Vec<Quotation>>
where
    S: SiteRepository,
    Q: QuotationRepository,
{
    LoadState::from_result(
        catalog.list_quotations_by_site(raw_site_id).await,
        "site_quotations",
        SITE_QUOTATIONS_FAILED,
    )
}

/// Quotation details screen.
pub async fn load_quotation<S, Q>(
    catalog: &CatalogService<S, Q>,
    raw_quotation_id: &str,
) -> LoadState<Quotation>
where
    S: SiteRepository,
    Q: QuotationRepository,
{
    LoadState::from_result(
        catalog.get_quotation(raw_quotation_id).await,
        "quotation",
        QUOTATION_FAILED,
    )
}
