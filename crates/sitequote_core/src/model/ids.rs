//! Canonical identifier types for sites and quotations.
//!
//! # Responsibility
//! - Give each entity exactly one identifier representation.
//! - Reject malformed identifiers at the type boundary.
//!
//! # Invariants
//! - `SiteId` is always a positive integer.
//! - `QuotationId` is always trimmed, non-empty text matching
//!   `QUOTATION_ID_PATTERN`.
//! - Legacy numeric quotation ids are normalized to decimal text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::NonZeroU64;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum accepted length of a quotation id, in chars.
pub const QUOTATION_ID_MAX_CHARS: usize = 64;

const QUOTATION_ID_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9_-]*$";
const GENERATED_QUOTATION_PREFIX: &str = "Q-";

static QUOTATION_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(QUOTATION_ID_PATTERN).expect("valid quotation id regex"));

/// Reason an identifier could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// Input was empty or whitespace only.
    Empty { entity: &'static str },
    /// Input is not a positive integer.
    NotPositiveInteger { entity: &'static str, raw: String },
    /// Input is longer than `QUOTATION_ID_MAX_CHARS`.
    TooLong { entity: &'static str, len: usize },
    /// Input contains characters outside the accepted alphabet.
    Malformed { entity: &'static str, raw: String },
}

impl Display for IdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { entity } => write!(f, "{entity} id cannot be empty"),
            Self::NotPositiveInteger { entity, raw } => {
                write!(f, "{entity} id must be a positive integer, got `{raw}`")
            }
            Self::TooLong { entity, len } => write!(
                f,
                "{entity} id is {len} chars long; max is {QUOTATION_ID_MAX_CHARS}"
            ),
            Self::Malformed { entity, raw } => write!(f, "malformed {entity} id `{raw}`"),
        }
    }
}

impl Error for IdError {}

/// Repository-assigned site identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(NonZeroU64);

impl SiteId {
    /// Parses the textual (route parameter) form of a site id.
    ///
    /// Only canonical decimal is accepted: ASCII digits, no sign, no
    /// leading zeros.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty { entity: "site" });
        }
        let canonical =
            trimmed.bytes().all(|b| b.is_ascii_digit()) && !trimmed.starts_with('0');
        canonical
            .then(|| trimmed.parse::<u64>().ok())
            .flatten()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or_else(|| IdError::NotPositiveInteger {
                entity: "site",
                raw: trimmed.to_string(),
            })
    }

    /// Returns the raw integer value.
    pub fn get(self) -> u64 {
        self.0.get()
    }

    pub(crate) fn from_non_zero(value: NonZeroU64) -> Self {
        Self(value)
    }
}

impl TryFrom<u64> for SiteId {
    type Error = IdError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        NonZeroU64::new(value)
            .map(Self)
            .ok_or_else(|| IdError::NotPositiveInteger {
                entity: "site",
                raw: value.to_string(),
            })
    }
}

impl FromStr for SiteId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for SiteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical quotation identifier (text).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct QuotationId(String);

impl QuotationId {
    /// Parses and validates a caller-supplied quotation id.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty {
                entity: "quotation",
            });
        }
        let len = trimmed.chars().count();
        if len > QUOTATION_ID_MAX_CHARS {
            return Err(IdError::TooLong {
                entity: "quotation",
                len,
            });
        }
        if !QUOTATION_ID_RE.is_match(trimmed) {
            return Err(IdError::Malformed {
                entity: "quotation",
                raw: trimmed.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Creates a fresh repository-assigned id (`Q-<uuid simple>`).
    pub fn generate() -> Self {
        Self(format!(
            "{GENERATED_QUOTATION_PREFIX}{}",
            Uuid::new_v4().simple()
        ))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<u64> for QuotationId {
    /// Legacy numeric ids map to their decimal text form.
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for QuotationId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for QuotationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for QuotationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WireQuotationId {
            Number(u64),
            Text(String),
        }

        match WireQuotationId::deserialize(deserializer)? {
            WireQuotationId::Number(value) => Ok(Self::from(value)),
            WireQuotationId::Text(value) => {
                Self::parse(value.as_str()).map_err(serde::de::Error::custom)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IdError, QuotationId, SiteId, QUOTATION_ID_MAX_CHARS};

    #[test]
    fn site_id_parse_accepts_positive_and_trims() {
        assert_eq!(SiteId::parse(" 42 ").unwrap().get(), 42);
    }

    #[test]
    fn site_id_parse_rejects_zero_negative_and_text() {
        for raw in ["0", "-3", "abc", "1.5", "+1", "007", "1_0"] {
            let err = SiteId::parse(raw).unwrap_err();
            assert!(
                matches!(err, IdError::NotPositiveInteger { .. }),
                "unexpected error for `{raw}`: {err:?}"
            );
        }
        assert_eq!(
            SiteId::parse("   ").unwrap_err(),
            IdError::Empty { entity: "site" }
        );
    }

    #[test]
    fn quotation_id_rejects_bad_alphabet_and_length() {
        assert!(matches!(
            QuotationId::parse("Q 1").unwrap_err(),
            IdError::Malformed { .. }
        ));
        assert!(matches!(
            QuotationId::parse("-leading").unwrap_err(),
            IdError::Malformed { .. }
        ));
        let long = "a".repeat(QUOTATION_ID_MAX_CHARS + 1);
        assert!(matches!(
            QuotationId::parse(&long).unwrap_err(),
            IdError::TooLong { .. }
        ));
    }

    #[test]
    fn generated_quotation_ids_are_valid_and_distinct() {
        let first = QuotationId::generate();
        let second = QuotationId::generate();
        assert_ne!(first, second);
        assert_eq!(QuotationId::parse(first.as_str()).unwrap(), first);
    }

    #[test]
    fn numeric_wire_ids_normalize_to_text() {
        let from_number: QuotationId = serde_json::from_value(serde_json::json!(7)).unwrap();
        let from_text: QuotationId = serde_json::from_value(serde_json::json!("7")).unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(from_number.as_str(), "7");
    }
}
