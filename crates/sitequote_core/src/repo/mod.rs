//! Repository layer: in-memory owners of site and quotation collections.
//!
//! # Responsibility
//! - Define async data access contracts for sites and quotations.
//! - Provide in-memory implementations that serialize writers and let
//!   readers run concurrently against a consistent snapshot.
//!
//! # Invariants
//! - Write paths validate input before taking the write lock.
//! - A failed `add_*` leaves the collection unchanged.
//! - Lookups return semantic errors (`NotFound`) instead of empty values.

use crate::model::ids::{IdError, QuotationId, SiteId};
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub mod quotation_repo;
pub mod site_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Identifies the record a lookup was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRef {
    Site(SiteId),
    Quotation(QuotationId),
}

impl Display for RecordRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Site(id) => write!(f, "site {id}"),
            Self::Quotation(id) => write!(f, "quotation {id}"),
        }
    }
}

/// Error returned by repository and catalog operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RepoError {
    /// `add_*` input is missing fields or has wrong values.
    Validation(ValidationError),
    /// No record has the requested id.
    NotFound(RecordRef),
    /// Lookup id is malformed (empty, wrong type).
    InvalidArgument(IdError),
    /// The site id counter cannot issue another id.
    IdSpaceExhausted,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(record) => write!(f, "{record} not found"),
            Self::InvalidArgument(err) => write!(f, "invalid argument: {err}"),
            Self::IdSpaceExhausted => f.write_str("site id space exhausted"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InvalidArgument(err) => Some(err),
            Self::NotFound(_) | Self::IdSpaceExhausted => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<IdError> for RepoError {
    fn from(value: IdError) -> Self {
        Self::InvalidArgument(value)
    }
}

impl RepoError {
    /// Short stable label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::IdSpaceExhausted => "id_space_exhausted",
        }
    }
}

/// Stands in for network latency. Zero means resolve immediately.
pub(crate) async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
