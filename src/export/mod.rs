//! Accounting software export: CSV variants and QuickBooks IIF.
//!
//! Serialises already-computed invoices; totals are read from
//! [`Invoice::totals`](crate::core::Invoice) and never recomputed here.
//! Nothing is written to disk, the caller saves or streams the content.
//!
//! # Example
//!
//! ```
//! use billwise::core::*;
//! use billwise::export::*;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("INV-0001", "Acme Ltd", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .client_email("billing@acme.test")
//!     .add_item(LineItem::new("Consulting", dec!(100), 2))
//!     .build()
//!     .unwrap();
//!
//! let options = ExportOptionsBuilder::new()
//!     .generated_on(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
//!     .build();
//! let result = export_invoices(&[invoice], "xero_csv", StatusFilter::All, &options).unwrap();
//! match result {
//!     ExportResult::Success { filename, count, .. } => {
//!         assert_eq!(filename, "invoices-xero-csv-2024-07-01.csv");
//!         assert_eq!(count, 1);
//!     }
//!     ExportResult::Empty => unreachable!(),
//! }
//! ```

mod csv;
mod iif;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{Invoice, InvoiceError, StatusFilter};

/// Supported export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    GenericCsv,
    XeroCsv,
    SageCsv,
    WaveCsv,
    FreshbooksCsv,
    QuickbooksIif,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 6] = [
        Self::GenericCsv,
        Self::XeroCsv,
        Self::SageCsv,
        Self::WaveCsv,
        Self::FreshbooksCsv,
        Self::QuickbooksIif,
    ];

    /// Format identifier, e.g. "xero_csv".
    pub fn id(&self) -> &'static str {
        match self {
            Self::GenericCsv => "generic_csv",
            Self::XeroCsv => "xero_csv",
            Self::SageCsv => "sage_csv",
            Self::WaveCsv => "wave_csv",
            Self::FreshbooksCsv => "freshbooks_csv",
            Self::QuickbooksIif => "quickbooks_iif",
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::QuickbooksIif => "iif",
            _ => "csv",
        }
    }

    /// Suggested download name: `invoices-{id with hyphens}-{YYYY-MM-DD}.{ext}`.
    pub fn filename(&self, generated_on: NaiveDate) -> String {
        format!(
            "invoices-{}-{}.{}",
            self.id().replace('_', "-"),
            generated_on.format("%Y-%m-%d"),
            self.extension()
        )
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ExportFormat {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.id() == s)
            .ok_or_else(|| InvoiceError::UnknownFormat(s.to_string()))
    }
}

/// Configuration for an export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Date used in the filename. `None` means today (local time).
    pub generated_on: Option<NaiveDate>,
    /// ISO 4217 code written to currency columns.
    pub currency: String,
    /// Debit account for IIF `TRNS` lines.
    pub receivable_account: String,
    /// Credit account for IIF `SPL` lines.
    pub income_account: String,
    /// Sales account code for Xero rows.
    pub account_code: String,
    /// Tax type label for Xero rows.
    pub tax_type: String,
    /// Emit one row per line item for targets that import line detail
    /// (Xero, Wave).
    pub line_detail: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            generated_on: None,
            currency: "USD".into(),
            receivable_account: "Accounts Receivable".into(),
            income_account: "Sales Income".into(),
            account_code: "200".into(),
            tax_type: "GST".into(),
            line_detail: false,
        }
    }
}

/// Builder for [`ExportOptions`].
///
/// ```
/// use billwise::export::ExportOptionsBuilder;
///
/// let options = ExportOptionsBuilder::new()
///     .currency("EUR")
///     .line_detail(true)
///     .build();
/// assert_eq!(options.currency, "EUR");
/// ```
#[derive(Debug, Default)]
pub struct ExportOptionsBuilder {
    options: ExportOptions,
}

impl ExportOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.options.generated_on = Some(date);
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.options.currency = code.into();
        self
    }

    pub fn receivable_account(mut self, name: impl Into<String>) -> Self {
        self.options.receivable_account = name.into();
        self
    }

    pub fn income_account(mut self, name: impl Into<String>) -> Self {
        self.options.income_account = name.into();
        self
    }

    pub fn account_code(mut self, code: impl Into<String>) -> Self {
        self.options.account_code = code.into();
        self
    }

    pub fn tax_type(mut self, tax_type: impl Into<String>) -> Self {
        self.options.tax_type = tax_type.into();
        self
    }

    pub fn line_detail(mut self, enabled: bool) -> Self {
        self.options.line_detail = enabled;
        self
    }

    pub fn build(self) -> ExportOptions {
        self.options
    }
}

/// Outcome of an export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportResult {
    /// No invoice matched the status filter. Not an error.
    Empty,
    /// Serialised payload ready for download.
    Success {
        content: String,
        filename: String,
        /// Number of invoices exported.
        count: usize,
    },
}

impl ExportResult {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Export invoices by format identifier.
///
/// An unrecognised `format_id` fails with [`InvoiceError::UnknownFormat`]
/// before any serialisation happens.
pub fn export_invoices(
    invoices: &[Invoice],
    format_id: &str,
    filter: StatusFilter,
    options: &ExportOptions,
) -> Result<ExportResult, InvoiceError> {
    let format: ExportFormat = format_id.parse()?;
    Ok(export(invoices, format, filter, options))
}

/// Export invoices matching `filter` in `format`, preserving input order.
pub fn export(
    invoices: &[Invoice],
    format: ExportFormat,
    filter: StatusFilter,
    options: &ExportOptions,
) -> ExportResult {
    let selected: Vec<&Invoice> = invoices
        .iter()
        .filter(|inv| filter.matches(inv.status))
        .collect();

    tracing::debug!(
        format = %format,
        filter = %filter,
        total = invoices.len(),
        selected = selected.len(),
        "exporting invoices"
    );

    if selected.is_empty() {
        return ExportResult::Empty;
    }

    let content = match csv::profile(format) {
        Some(profile) => csv::to_csv(&selected, profile, options),
        None => iif::to_iif(&selected, options),
    };

    let generated_on = options
        .generated_on
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    ExportResult::Success {
        content,
        filename: format.filename(generated_on),
        count: selected.len(),
    }
}
