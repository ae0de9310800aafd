//! Site domain model.
//!
//! # Responsibility
//! - Define the installation-location record and its add-form input.
//! - Validate add-form input into a storable shape.
//!
//! # Invariants
//! - `site_id` is assigned by the repository and never changes.
//! - `name` and every address part are non-empty, trimmed text.
//! - `risks` keeps caller order; duplicates are allowed, blanks are not.

use crate::model::ids::SiteId;
use crate::model::validation::{FieldErrors, FieldProblem, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Site classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SiteType {
    Industrial,
    Residential,
}

impl SiteType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Industrial => "Industrial",
            Self::Residential => "Residential",
        }
    }
}

impl Display for SiteType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "industrial" => Ok(Self::Industrial),
            "residential" => Ok(Self::Residential),
            _ => Err(format!(
                "unsupported site type `{trimmed}`; expected Industrial|Residential"
            )),
        }
    }
}

impl TryFrom<String> for SiteType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Postal address of a site. No format rules beyond non-empty parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

impl Address {
    /// Single-line rendering used by list cards.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {}, {}, {}",
            self.street, self.city, self.state, self.country, self.postal_code
        )
    }
}

/// Stored site record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub site_id: SiteId,
    pub name: String,
    pub address: Address,
    pub site_type: SiteType,
    pub risks: Vec<String>,
}

/// Address part of the add-site form. `None` means the field was not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressInput {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

impl From<Address> for AddressInput {
    fn from(value: Address) -> Self {
        Self {
            street: Some(value.street),
            city: Some(value.city),
            state: Some(value.state),
            country: Some(value.country),
            postal_code: Some(value.postal_code),
        }
    }
}

/// Candidate site submitted to `add_site`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInput {
    pub name: Option<String>,
    pub address: Option<AddressInput>,
    pub site_type: Option<SiteType>,
    pub risks: Vec<String>,
}

/// Validated site content waiting for an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewSite {
    pub name: String,
    pub address: Address,
    pub site_type: SiteType,
    pub risks: Vec<String>,
}

impl NewSite {
    pub(crate) fn into_site(self, site_id: SiteId) -> Site {
        Site {
            site_id,
            name: self.name,
            address: self.address,
            site_type: self.site_type,
            risks: self.risks,
        }
    }
}

impl SiteInput {
    /// Creates a complete input from typed parts.
    pub fn new(
        name: impl Into<String>,
        address: Address,
        site_type: SiteType,
        risks: Vec<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            address: Some(address.into()),
            site_type: Some(site_type),
            risks,
        }
    }

    /// Replaces `risks` with labels parsed from the comma separated form value.
    pub fn with_risk_list(mut self, raw: &str) -> Self {
        self.risks = parse_risk_labels(raw);
        self
    }

    /// Checks every field and returns the storable shape.
    ///
    /// # Errors
    /// - Returns `ValidationError` listing every missing or empty field.
    pub(crate) fn validate(&self) -> Result<NewSite, ValidationError> {
        let mut errors = FieldErrors::default();

        let name = errors.required_text("name", self.name.as_deref());
        let address = match &self.address {
            None => {
                errors.push("address", FieldProblem::Missing);
                None
            }
            Some(address) => validate_address(address, &mut errors),
        };
        if self.site_type.is_none() {
            errors.push("site_type", FieldProblem::Missing);
        }

        let mut risks = Vec::with_capacity(self.risks.len());
        for (index, risk) in self.risks.iter().enumerate() {
            let trimmed = risk.trim();
            if trimmed.is_empty() {
                errors.push(format!("risks[{index}]"), FieldProblem::Empty);
            } else {
                risks.push(trimmed.to_string());
            }
        }

        errors.into_result()?;
        match (name, address, self.site_type) {
            (Some(name), Some(address), Some(site_type)) => Ok(NewSite {
                name,
                address,
                site_type,
                risks,
            }),
            _ => Err(ValidationError::single(
                "site",
                FieldProblem::Malformed("incomplete input".to_string()),
            )),
        }
    }
}

fn validate_address(input: &AddressInput, errors: &mut FieldErrors) -> Option<Address> {
    let street = errors.required_text("address.street", input.street.as_deref());
    let city = errors.required_text("address.city", input.city.as_deref());
    let state = errors.required_text("address.state", input.state.as_deref());
    let country = errors.required_text("address.country", input.country.as_deref());
    let postal_code = errors.required_text("address.postal_code", input.postal_code.as_deref());

    Some(Address {
        street: street?,
        city: city?,
        state: state?,
        country: country?,
        postal_code: postal_code?,
    })
}

/// Splits the add-site form's comma separated risk text into labels.
///
/// Labels are trimmed and blank fragments are dropped; order and duplicates
/// are preserved.
pub fn parse_risk_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_risk_labels, SiteType};

    #[test]
    fn risk_labels_keep_order_and_duplicates() {
        assert_eq!(
            parse_risk_labels(" Fire, Flood,,Fire ,"),
            vec!["Fire", "Flood", "Fire"]
        );
        assert!(parse_risk_labels("").is_empty());
    }

    #[test]
    fn site_type_parses_case_insensitively() {
        assert_eq!("industrial".parse::<SiteType>(), Ok(SiteType::Industrial));
        assert_eq!(
            " RESIDENTIAL ".parse::<SiteType>(),
            Ok(SiteType::Residential)
        );
        assert_eq!(
            " Commercial ".parse::<SiteType>(),
            Err("unsupported site type `Commercial`; expected Industrial|Residential".to_string())
        );
    }
}
