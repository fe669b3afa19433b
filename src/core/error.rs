use rust_decimal::Decimal;
use thiserror::Error;

use super::types::InvoiceStatus;

/// Errors that can occur while computing, building, or exporting invoices.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// Line items or invoice fields violate their constraints.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A discount or VAT percentage lies outside `[0, 100]`.
    #[error("invalid percentage for {field}: {value} (must be between 0 and 100)")]
    InvalidPercentage {
        /// Which percentage was rejected ("discount" or "vat").
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// The requested export format id is not one of the supported targets.
    #[error("unknown export format: {0}")]
    UnknownFormat(String),

    /// A status change the invoice lifecycle does not allow.
    #[error("cannot move invoice from {from} to {to}")]
    InvalidTransition {
        /// Status the invoice is currently in.
        from: InvoiceStatus,
        /// Status that was requested.
        to: InvoiceStatus,
    },

    /// Invoice number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// Decimal overflow while summing or scaling amounts.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items[0].rate").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Join a list of validation errors into a single `InvalidInput` error.
pub(crate) fn invalid_input(errors: &[ValidationError]) -> InvoiceError {
    let msg = errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    InvoiceError::InvalidInput(msg)
}
