//! Quotation repository contract and in-memory implementation.
//!
//! # Invariants
//! - `quotation_id` is unique across the collection; a caller-supplied id
//!   that is already stored is rejected as `Duplicate`.
//! - Site-scoped listing never verifies the site exists; that check
//!   belongs to the catalog service at write time.

use crate::model::ids::{QuotationId, SiteId};
use crate::model::quotation::{Quotation, QuotationInput};
use crate::model::validation::{FieldProblem, ValidationError};
use crate::repo::{simulate_latency, RecordRef, RepoError, RepoResult};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::sync::RwLock;

/// Repository interface for quotation lookups and inserts.
pub trait QuotationRepository: Send + Sync {
    /// Returns every quotation in insertion order.
    fn list_quotations(&self) -> impl Future<Output = Vec<Quotation>> + Send;

    /// Returns quotations whose `site_id` matches, in insertion order.
    ///
    /// An unknown or quotation-less site yields an empty list.
    fn list_quotations_by_site(
        &self,
        site_id: SiteId,
    ) -> impl Future<Output = Vec<Quotation>> + Send;

    /// Returns exactly one quotation, or `NotFound`.
    fn get_quotation_by_id(
        &self,
        quotation_id: &QuotationId,
    ) -> impl Future<Output = RepoResult<Quotation>> + Send;

    /// Validates `candidate`, assigns an id when absent and stores it.
    fn add_quotation(
        &self,
        candidate: &QuotationInput,
    ) -> impl Future<Output = RepoResult<Quotation>> + Send;
}

#[derive(Default)]
struct QuotationState {
    quotations: Vec<Quotation>,
    positions: HashMap<QuotationId, usize>,
}

impl QuotationState {
    fn fresh_id(&self) -> QuotationId {
        loop {
            let candidate = QuotationId::generate();
            if !self.positions.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

/// In-memory quotation repository guarded by a read/write lock.
pub struct InMemoryQuotationRepository {
    state: RwLock<QuotationState>,
    latency: Duration,
}

impl InMemoryQuotationRepository {
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// Creates an empty repository that waits `latency` before each call.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            state: RwLock::new(QuotationState::default()),
            latency,
        }
    }

    /// Number of stored quotations.
    pub async fn len(&self) -> usize {
        self.state.read().await.quotations.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryQuotationRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl QuotationRepository for InMemoryQuotationRepository {
    async fn list_quotations(&self) -> Vec<Quotation> {
        simulate_latency(self.latency).await;
        self.state.read().await.quotations.clone()
    }

    async fn list_quotations_by_site(&self, site_id: SiteId) -> Vec<Quotation> {
        simulate_latency(self.latency).await;
        let state = self.state.read().await;
        let matching: Vec<Quotation> = state
            .quotations
            .iter()
            .filter(|quotation| quotation.site_id == site_id)
            .cloned()
            .collect();
        debug!(
            "event=quotation_list module=repo status=ok site_id={site_id} count={}",
            matching.len()
        );
        matching
    }

    async fn get_quotation_by_id(&self, quotation_id: &QuotationId) -> RepoResult<Quotation> {
        simulate_latency(self.latency).await;
        let state = self.state.read().await;
        state
            .positions
            .get(quotation_id)
            .and_then(|&position| state.quotations.get(position))
            .cloned()
            .ok_or_else(|| {
                debug!("event=quotation_get module=repo status=not_found");
                RepoError::NotFound(RecordRef::Quotation(quotation_id.clone()))
            })
    }

    async fn add_quotation(&self, candidate: &QuotationInput) -> RepoResult<Quotation> {
        simulate_latency(self.latency).await;
        let new_quotation = candidate.validate().map_err(|err| {
            warn!(
                "event=quotation_add module=repo status=rejected fields={}",
                err.field_names().join(",")
            );
            err
        })?;

        let mut state = self.state.write().await;
        let quotation_id = match new_quotation.quotation_id.clone() {
            Some(supplied) if state.positions.contains_key(&supplied) => {
                warn!("event=quotation_add module=repo status=rejected fields=quotation_id");
                return Err(
                    ValidationError::single("quotation_id", FieldProblem::Duplicate).into(),
                );
            }
            Some(supplied) => supplied,
            None => state.fresh_id(),
        };

        let quotation = new_quotation.into_quotation(quotation_id.clone());
        let position = state.quotations.len();
        state.quotations.push(quotation.clone());
        state.positions.insert(quotation_id, position);

        info!(
            "event=quotation_add module=repo status=ok site_id={} quantity={}",
            quotation.site_id, quotation.quantity
        );
        Ok(quotation)
    }
}
