//! Quotation domain model.
//!
//! # Responsibility
//! - Define the product quote record tied to a site by id.
//! - Validate add-form input and apply defaults.
//!
//! # Invariants
//! - `quotation_id` is unique and never changes once stored.
//! - `height` and `width` are finite, non-negative centimeters.
//! - `quantity` is at least 1 and defaults to 1.

use crate::model::ids::{QuotationId, SiteId};
use crate::model::validation::{FieldErrors, FieldProblem, ValidationError};
use serde::{Deserialize, Deserializer, Serialize};

/// Quantity applied when the form leaves it out.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Stored quotation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub quotation_id: QuotationId,
    pub site_id: SiteId,
    pub product_name: String,
    /// Centimeters.
    pub height: f64,
    /// Centimeters.
    pub width: f64,
    pub quantity: u32,
}

/// Candidate quotation submitted to `add_quotation`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotationInput {
    /// Caller-chosen id; the repository generates one when absent.
    /// Legacy numeric ids are accepted and kept as decimal text.
    #[serde(deserialize_with = "raw_quotation_id")]
    pub quotation_id: Option<String>,
    pub site_id: Option<SiteId>,
    pub product_name: Option<String>,
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub quantity: Option<u32>,
}

/// Validated quotation content. `quotation_id` is still optional here.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewQuotation {
    pub quotation_id: Option<QuotationId>,
    pub site_id: SiteId,
    pub product_name: String,
    pub height: f64,
    pub width: f64,
    pub quantity: u32,
}

impl NewQuotation {
    pub(crate) fn into_quotation(self, quotation_id: QuotationId) -> Quotation {
        Quotation {
            quotation_id,
            site_id: self.site_id,
            product_name: self.product_name,
            height: self.height,
            width: self.width,
            quantity: self.quantity,
        }
    }
}

fn raw_quotation_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireId {
        Number(u64),
        Text(String),
    }

    Ok(
        Option::<WireId>::deserialize(deserializer)?.map(|wire| match wire {
            WireId::Number(value) => value.to_string(),
            WireId::Text(value) => value,
        }),
    )
}

impl QuotationInput {
    /// Creates an input without id or quantity; both get defaults on insert.
    pub fn new(site_id: SiteId, product_name: impl Into<String>, height: f64, width: f64) -> Self {
        Self {
            quotation_id: None,
            site_id: Some(site_id),
            product_name: Some(product_name.into()),
            height: Some(height),
            width: Some(width),
            quantity: None,
        }
    }

    pub fn with_quotation_id(mut self, quotation_id: impl Into<String>) -> Self {
        self.quotation_id = Some(quotation_id.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Checks every field and applies the quantity default.
    pub(crate) fn validate(&self) -> Result<NewQuotation, ValidationError> {
        let mut errors = FieldErrors::default();

        let quotation_id = match self.quotation_id.as_deref() {
            None => None,
            Some(raw) => match QuotationId::parse(raw) {
                Ok(id) => Some(id),
                Err(err) => {
                    errors.push("quotation_id", FieldProblem::Malformed(err.to_string()));
                    None
                }
            },
        };
        if self.site_id.is_none() {
            errors.push("site_id", FieldProblem::Missing);
        }
        let product_name = errors.required_text("product_name", self.product_name.as_deref());
        let height = errors.non_negative("height", self.height);
        let width = errors.non_negative("width", self.width);
        let quantity = self.quantity.unwrap_or(DEFAULT_QUANTITY);
        if quantity == 0 {
            errors.push("quantity", FieldProblem::Zero);
        }

        errors.into_result()?;
        match (self.site_id, product_name, height, width) {
            (Some(site_id), Some(product_name), Some(height), Some(width)) => Ok(NewQuotation {
                quotation_id,
                site_id,
                product_name,
                height,
                width,
                quantity,
            }),
            _ => Err(ValidationError::single(
                "quotation",
                FieldProblem::Malformed("incomplete input".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{QuotationInput, DEFAULT_QUANTITY};
    use crate::model::ids::{QuotationId, SiteId};
    use crate::model::validation::FieldProblem;

    fn site() -> SiteId {
        SiteId::try_from(1).unwrap()
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        let validated = QuotationInput::new(site(), "Window", 100.0, 50.0)
            .validate()
            .unwrap();
        assert_eq!(validated.quantity, DEFAULT_QUANTITY);
        assert!(validated.quotation_id.is_none());
    }

    #[test]
    fn validate_reports_all_offending_fields() {
        let input = QuotationInput {
            quotation_id: Some("bad id!".to_string()),
            height: Some(-1.0),
            width: Some(f64::INFINITY),
            quantity: Some(0),
            ..QuotationInput::default()
        };
        let err = input.validate().unwrap_err();
        assert_eq!(
            err.field_names(),
            vec![
                "quotation_id",
                "site_id",
                "product_name",
                "height",
                "width",
                "quantity"
            ]
        );
        assert_eq!(err.fields[1].problem, FieldProblem::Missing);
        assert_eq!(err.fields[5].problem, FieldProblem::Zero);
    }

    #[test]
    fn numeric_wire_id_is_kept_as_decimal_text() {
        let input: QuotationInput = serde_json::from_value(serde_json::json!({
            "quotation_id": 7,
            "site_id": 1,
            "product_name": "Window",
            "height": 100,
            "width": 50
        }))
        .unwrap();
        assert_eq!(input.quotation_id.as_deref(), Some("7"));

        let validated = input.validate().unwrap();
        assert_eq!(validated.quotation_id.map(|id| id.to_string()).as_deref(), Some("7"));

        let absent: QuotationInput = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(absent.quotation_id.is_none());
    }

    #[test]
    fn negative_zero_measurement_is_stored_as_zero() {
        let validated = QuotationInput::new(site(), "Window", -0.0, 0.0)
            .validate()
            .unwrap();
        assert!(validated.height.is_sign_positive());
        let json = serde_json::to_string(&validated.into_quotation(QuotationId::generate()))
            .unwrap();
        assert!(json.contains("\"height\":0.0"), "{json}");
    }
}
