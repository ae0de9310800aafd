//! Site repository contract and in-memory implementation.
//!
//! # Invariants
//! - `site_id` values come from a counter that only moves forward, so an
//!   id is never issued twice during the repository lifetime.
//! - `list_sites` returns insertion order.

use crate::model::ids::SiteId;
use crate::model::site::{Site, SiteInput};
use crate::repo::{simulate_latency, RecordRef, RepoError, RepoResult};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroU64;
use std::time::Duration;
use tokio::sync::RwLock;

/// Repository interface for site lookups and inserts.
pub trait SiteRepository: Send + Sync {
    /// Returns all sites in insertion order.
    fn list_sites(&self) -> impl Future<Output = Vec<Site>> + Send;

    /// Returns the site with `site_id`, or `NotFound`.
    fn get_site_by_id(&self, site_id: SiteId) -> impl Future<Output = RepoResult<Site>> + Send;

    /// Validates `candidate`, assigns a fresh id and stores it.
    fn add_site(&self, candidate: &SiteInput) -> impl Future<Output = RepoResult<Site>> + Send;
}

struct SiteState {
    sites: Vec<Site>,
    positions: HashMap<SiteId, usize>,
    /// `None` once `u64::MAX` has been handed out.
    next_id: Option<NonZeroU64>,
}

impl SiteState {
    fn allocate_id(&mut self) -> RepoResult<SiteId> {
        let current = self.next_id.ok_or(RepoError::IdSpaceExhausted)?;
        self.next_id = current.checked_add(1);
        Ok(SiteId::from_non_zero(current))
    }
}

/// In-memory site repository guarded by a read/write lock.
pub struct InMemorySiteRepository {
    state: RwLock<SiteState>,
    latency: Duration,
}

impl InMemorySiteRepository {
    /// Creates an empty repository whose first id is `1`.
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// Creates an empty repository that waits `latency` before each call.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            state: RwLock::new(SiteState {
                sites: Vec::new(),
                positions: HashMap::new(),
                next_id: Some(NonZeroU64::MIN),
            }),
            latency,
        }
    }

    /// Number of stored sites.
    pub async fn len(&self) -> usize {
        self.state.read().await.sites.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemorySiteRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteRepository for InMemorySiteRepository {
    async fn list_sites(&self) -> Vec<Site> {
        simulate_latency(self.latency).await;
        let state = self.state.read().await;
        debug!(
            "event=site_list module=repo status=ok count={}",
            state.sites.len()
        );
        state.sites.clone()
    }

    async fn get_site_by_id(&self, site_id: SiteId) -> RepoResult<Site> {
        simulate_latency(self.latency).await;
        let state = self.state.read().await;
        let found = state
            .positions
            .get(&site_id)
            .and_then(|&position| state.sites.get(position));
        match found {
            Some(site) => Ok(site.clone()),
            None => {
                debug!("event=site_get module=repo status=not_found site_id={site_id}");
                Err(RepoError::NotFound(RecordRef::Site(site_id)))
            }
        }
    }

    async fn add_site(&self, candidate: &SiteInput) -> RepoResult<Site> {
        simulate_latency(self.latency).await;
        let new_site = candidate.validate().map_err(|err| {
            warn!(
                "event=site_add module=repo status=rejected fields={}",
                err.field_names().join(",")
            );
            err
        })?;

        let mut state = self.state.write().await;
        let site_id = state.allocate_id()?;
        let site = new_site.into_site(site_id);
        let position = state.sites.len();
        state.sites.push(site.clone());
        state.positions.insert(site_id, position);

        info!(
            "event=site_add module=repo status=ok site_id={site_id} risks={}",
            site.risks.len()
        );
        Ok(site)
    }
}
