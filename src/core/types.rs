use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculator::Financials;
use super::error::InvoiceError;

/// An invoice as handed over by the persistence layer.
///
/// `totals` is derived from `items`, `discount_pct` and `vat_pct`; use
/// [`Invoice::recalculate`] after changing any of them.
///
/// On the wire the money fields are flat decimal strings (`subtotal`,
/// `discount`, `vat`, `total`), see [`InvoiceRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InvoiceRecord", into = "InvoiceRecord")]
pub struct Invoice {
    /// Invoice number, `{prefix}{zero-padded sequence}`.
    pub number: String,
    /// Billed client's display name.
    pub client_name: String,
    /// Address reminders and invoices are sent to.
    pub client_email: String,
    /// Issue date.
    pub invoice_date: NaiveDate,
    /// Payment due date, never before `invoice_date`.
    pub due_date: NaiveDate,
    /// Lifecycle status.
    pub status: InvoiceStatus,
    /// Billable lines, at least one.
    pub items: Vec<LineItem>,
    /// Discount percentage applied to the subtotal, `[0, 100]`.
    pub discount_pct: Decimal,
    /// VAT percentage applied to the discounted base, `[0, 100]`.
    pub vat_pct: Decimal,
    /// Amount required upfront. Informational only, never subtracted from the total.
    pub deposit: Option<Decimal>,
    /// Derived money fields.
    pub totals: Financials,
    /// Free text printed on the invoice and carried into exports.
    pub notes: Option<String>,
}

/// Transport shape of an [`Invoice`] as stored by the persistence layer.
///
/// Money fields are flat decimal strings. The percentages are optional on
/// input; when absent they are derived from the stored amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: String,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    /// Discount amount.
    pub discount: Decimal,
    /// VAT amount.
    pub vat: Decimal,
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_pct: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_pct: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<Invoice> for InvoiceRecord {
    fn from(inv: Invoice) -> Self {
        Self {
            invoice_number: inv.number,
            client_name: inv.client_name,
            client_email: inv.client_email,
            invoice_date: inv.invoice_date,
            due_date: inv.due_date,
            status: inv.status,
            items: inv.items,
            subtotal: inv.totals.subtotal,
            discount: inv.totals.discount_amount,
            vat: inv.totals.vat_amount,
            total: inv.totals.total,
            discount_pct: Some(inv.discount_pct),
            vat_pct: Some(inv.vat_pct),
            deposit: inv.deposit,
            notes: inv.notes,
        }
    }
}

impl TryFrom<InvoiceRecord> for Invoice {
    type Error = InvoiceError;

    /// Stored amounts are kept as-is; only missing percentages are derived.
    fn try_from(rec: InvoiceRecord) -> Result<Self, Self::Error> {
        let taxable_base = rec
            .subtotal
            .checked_sub(rec.discount)
            .ok_or_else(|| InvoiceError::Arithmetic("taxable base out of range".into()))?;

        let discount_pct = match rec.discount_pct {
            Some(pct) => pct,
            None => percentage_of(rec.discount, rec.subtotal)?,
        };
        let vat_pct = match rec.vat_pct {
            Some(pct) => pct,
            None => percentage_of(rec.vat, taxable_base)?,
        };

        Ok(Self {
            number: rec.invoice_number,
            client_name: rec.client_name,
            client_email: rec.client_email,
            invoice_date: rec.invoice_date,
            due_date: rec.due_date,
            status: rec.status,
            items: rec.items,
            discount_pct,
            vat_pct,
            deposit: rec.deposit,
            totals: Financials {
                subtotal: rec.subtotal,
                discount_amount: rec.discount,
                taxable_base,
                vat_amount: rec.vat,
                total: rec.total,
            },
            notes: rec.notes,
        })
    }
}

/// `part` as a percentage of `whole`; zero when `whole` is zero.
fn percentage_of(part: Decimal, whole: Decimal) -> Result<Decimal, InvoiceError> {
    if whole.is_zero() {
        return Ok(Decimal::ZERO);
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|p| p.checked_div(whole))
        .map(|p| p.normalize())
        .ok_or_else(|| InvoiceError::Arithmetic(format!("percentage of {part} in {whole} out of range")))
}

impl Invoice {
    /// Re-derive `totals` from the line items and percentages.
    pub fn recalculate(&mut self) -> Result<(), InvoiceError> {
        self.totals =
            super::calculator::compute_financials(&self.items, self.discount_pct, self.vat_pct)?;
        Ok(())
    }

    /// Move the invoice to `to`, enforcing the lifecycle rules.
    pub fn transition(&mut self, to: InvoiceStatus) -> Result<(), InvoiceError> {
        if !self.status.can_transition_to(to) {
            return Err(InvoiceError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    /// Mark a draft or pending invoice as dispatched to the client.
    pub fn mark_sent(&mut self) -> Result<(), InvoiceError> {
        self.transition(InvoiceStatus::Sent)
    }
}

/// A billable line on an invoice.
///
/// The amount is not stored; [`LineItem::amount`] derives it from
/// `rate * quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price, ≥ 0.
    pub rate: Decimal,
    /// Number of units, ≥ 1.
    pub quantity: u32,
}

impl LineItem {
    pub fn new(name: impl Into<String>, rate: Decimal, quantity: u32) -> Self {
        Self {
            name: name.into(),
            description: None,
            rate,
            quantity,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Line amount, `rate * quantity`, at full precision; `None` if the
    /// product exceeds the decimal range.
    pub fn amount(&self) -> Option<Decimal> {
        self.rate.checked_mul(Decimal::from(self.quantity))
    }
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Pending,
    Sent,
    Paid,
    Overdue,
    Partial,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 6] = [
        Self::Draft,
        Self::Pending,
        Self::Sent,
        Self::Paid,
        Self::Overdue,
        Self::Partial,
    ];

    /// Lowercase identifier as used in storage and filters.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Partial => "partial",
        }
    }

    /// Display label, e.g. "Overdue".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Pending => "Pending",
            Self::Sent => "Sent",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
            Self::Partial => "Partial",
        }
    }

    /// Whether the lifecycle allows moving from `self` to `to`.
    ///
    /// Staying in the same status is always allowed. `Paid` is terminal.
    pub fn can_transition_to(&self, to: InvoiceStatus) -> bool {
        use InvoiceStatus::*;
        if *self == to {
            return true;
        }
        match self {
            Draft => matches!(to, Pending | Sent),
            Pending => matches!(to, Sent | Overdue | Paid | Partial),
            Sent => matches!(to, Paid | Partial | Overdue),
            Partial => matches!(to, Paid | Overdue),
            Overdue => matches!(to, Paid | Partial),
            Paid => false,
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for InvoiceStatus {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InvoiceError::InvalidInput(format!("unknown invoice status '{s}'")))
    }
}

/// Status selection for exports: everything, or a single status.
///
/// Serialised as `"all"` or a status id, the same text as `Display`/`FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(InvoiceStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: InvoiceStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(s) => *s == status,
        }
    }
}

impl From<InvoiceStatus> for StatusFilter {
    fn from(status: InvoiceStatus) -> Self {
        Self::Only(status)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(s) => s.fmt(f),
        }
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = InvoiceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for StatusFilter {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}
