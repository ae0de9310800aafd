//! Field-level validation results shared by site and quotation inputs.
//!
//! # Invariants
//! - A `ValidationError` always lists at least one field.
//! - Every offending field is reported, not only the first one found.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// What is wrong with one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    Missing,
    Empty,
    Negative,
    NotFinite,
    Zero,
    Malformed(String),
    Duplicate,
    UnknownReference,
}

impl Display for FieldProblem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => f.write_str("is required"),
            Self::Empty => f.write_str("cannot be empty"),
            Self::Negative => f.write_str("cannot be negative"),
            Self::NotFinite => f.write_str("must be a finite number"),
            Self::Zero => f.write_str("must be greater than zero"),
            Self::Malformed(details) => write!(f, "is malformed: {details}"),
            Self::Duplicate => f.write_str("is already in use"),
            Self::UnknownReference => f.write_str("references a record that does not exist"),
        }
    }
}

/// One offending field, addressed by its wire name (`address.city`, `risks[2]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub problem: FieldProblem,
}

/// Input rejected by an `add_*` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    /// Builds an error for a single field.
    pub fn single(field: impl Into<String>, problem: FieldProblem) -> Self {
        Self {
            fields: vec![FieldError {
                field: field.into(),
                problem,
            }],
        }
    }

    /// Returns whether `field` is among the offending fields.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|entry| entry.field == field)
    }

    /// Returns the offending field names in report order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|entry| entry.field.as_str()).collect()
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid input: ")?;
        for (index, entry) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "`{}` {}", entry.field, entry.problem)?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

/// Accumulates field problems while an input is being checked.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    fields: Vec<FieldError>,
}

impl FieldErrors {
    pub(crate) fn push(&mut self, field: impl Into<String>, problem: FieldProblem) {
        self.fields.push(FieldError {
            field: field.into(),
            problem,
        });
    }

    /// Returns a trimmed copy of a required text field, recording the problem otherwise.
    pub(crate) fn required_text(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        match value {
            None => {
                self.push(field, FieldProblem::Missing);
                None
            }
            Some(text) if text.trim().is_empty() => {
                self.push(field, FieldProblem::Empty);
                None
            }
            Some(text) => Some(text.trim().to_string()),
        }
    }

    /// Checks a measurement that must be finite and `>= 0`.
    pub(crate) fn non_negative(&mut self, field: &str, value: Option<f64>) -> Option<f64> {
        match value {
            None => {
                self.push(field, FieldProblem::Missing);
                None
            }
            Some(number) if !number.is_finite() => {
                self.push(field, FieldProblem::NotFinite);
                None
            }
            Some(number) if number < 0.0 => {
                self.push(field, FieldProblem::Negative);
                None
            }
            // `-0.0` passes `< 0.0`; store it as `0.0`.
            Some(number) => Some(number + 0.0),
        }
    }

    pub(crate) fn into_result(self) -> Result<(), ValidationError> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                fields: self.fields,
            })
        }
    }
}
