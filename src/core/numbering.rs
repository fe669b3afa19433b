use serde::{Deserialize, Serialize};

use super::error::InvoiceError;

/// Invoice numbering settings as kept by the settings store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSettings {
    pub invoice_prefix: String,
    pub next_invoice_number: u64,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            invoice_prefix: "INV-".into(),
            next_invoice_number: 1,
        }
    }
}

/// Sequential invoice number generator.
///
/// Generates numbers in the format `{prefix}{zero-padded sequence}`,
/// e.g. "INV-0001", "INV-0002". The sequence is a plain value owned by the
/// caller; persist it back with [`InvoiceNumberSequence::settings`] after
/// issuing numbers.
#[derive(Debug, Clone)]
pub struct InvoiceNumberSequence {
    prefix: String,
    next_number: u64,
    zero_pad: usize,
}

impl InvoiceNumberSequence {
    /// Create a new sequence starting at 1.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    /// Create a sequence continuing from a given number.
    pub fn starting_at(prefix: impl Into<String>, next_number: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next_number,
            zero_pad: 4,
        }
    }

    /// Continue the sequence stored in the settings collaborator.
    pub fn from_settings(settings: &InvoiceSettings) -> Result<Self, InvoiceError> {
        if settings.next_invoice_number == 0 {
            return Err(InvoiceError::Numbering(
                "next invoice number must be at least 1".into(),
            ));
        }
        Ok(Self::starting_at(
            settings.invoice_prefix.clone(),
            settings.next_invoice_number,
        ))
    }

    /// Set zero-padding width (default: 4, so "0001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Generate the next invoice number.
    pub fn next_number(&mut self) -> Result<String, InvoiceError> {
        let formatted = self.peek();
        self.next_number = self
            .next_number
            .checked_add(1)
            .ok_or_else(|| InvoiceError::Numbering("invoice number sequence exhausted".into()))?;
        Ok(formatted)
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        format!(
            "{}{:0>width$}",
            self.prefix,
            self.next_number,
            width = self.zero_pad
        )
    }

    /// Get the next number that will be issued (without prefix/formatting).
    pub fn next_raw(&self) -> u64 {
        self.next_number
    }

    /// Current state, for writing back to the settings store.
    pub fn settings(&self) -> InvoiceSettings {
        InvoiceSettings {
            invoice_prefix: self.prefix.clone(),
            next_invoice_number: self.next_number,
        }
    }
}
