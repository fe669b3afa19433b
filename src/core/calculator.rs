use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::InvoiceError;
use super::types::LineItem;
use super::validation;

/// Derived money fields of an invoice.
///
/// Values are kept at full precision; call [`Financials::rounded`] or
/// [`format_money`] when presenting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    /// Sum of `rate * quantity` over all lines.
    pub subtotal: Decimal,
    /// `subtotal * discount_pct / 100`.
    pub discount_amount: Decimal,
    /// `subtotal - discount_amount`.
    pub taxable_base: Decimal,
    /// `taxable_base * vat_pct / 100`.
    pub vat_amount: Decimal,
    /// `taxable_base + vat_amount`.
    pub total: Decimal,
}

impl Financials {
    /// Every field rounded half-up to cents.
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: round_money(self.subtotal),
            discount_amount: round_money(self.discount_amount),
            taxable_base: round_money(self.taxable_base),
            vat_amount: round_money(self.vat_amount),
            total: round_money(self.total),
        }
    }
}

/// Compute subtotal, discount, VAT and total for a set of line items.
///
/// The discount is taken off the subtotal first and VAT is charged on the
/// discounted base.
///
/// ```
/// use billwise::core::*;
/// use rust_decimal_macros::dec;
///
/// let items = [LineItem::new("Consulting", dec!(100), 2), LineItem::new("Setup", dec!(50), 1)];
/// let f = compute_financials(&items, dec!(10), dec!(20)).unwrap();
/// assert_eq!(f.subtotal, dec!(250.00));
/// assert_eq!(f.discount_amount, dec!(25.00));
/// assert_eq!(f.vat_amount, dec!(45.00));
/// assert_eq!(f.total, dec!(270.00));
/// ```
pub fn compute_financials(
    items: &[LineItem],
    discount_pct: Decimal,
    vat_pct: Decimal,
) -> Result<Financials, InvoiceError> {
    validation::check_percentage("discount", discount_pct)?;
    validation::check_percentage("vat", vat_pct)?;

    let errors = validation::validate_line_items(items);
    if !errors.is_empty() {
        return Err(super::error::invalid_input(&errors));
    }

    let mut subtotal = Decimal::ZERO;
    for (i, item) in items.iter().enumerate() {
        let amount = item
            .amount()
            .ok_or_else(|| overflow(format!("amount of items[{i}]")))?;
        subtotal = subtotal
            .checked_add(amount)
            .ok_or_else(|| overflow("subtotal".into()))?;
    }

    let discount_amount = percent_of(subtotal, discount_pct)?;
    let taxable_base = subtotal - discount_amount;
    let vat_amount = percent_of(taxable_base, vat_pct)?;
    let total = taxable_base
        .checked_add(vat_amount)
        .ok_or_else(|| overflow("total".into()))?;

    Ok(Financials {
        subtotal,
        discount_amount,
        taxable_base,
        vat_amount,
        total,
    })
}

/// Round a money value half-up (commercial rounding) to 2 decimal places.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a money value as `1234.50`: half-up to cents, always two decimals.
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

fn percent_of(base: Decimal, pct: Decimal) -> Result<Decimal, InvoiceError> {
    base.checked_mul(pct)
        .map(|v| v / dec!(100))
        .ok_or_else(|| overflow(format!("{pct}% of {base}")))
}

fn overflow(what: String) -> InvoiceError {
    InvoiceError::Arithmetic(format!("{what} exceeds the supported decimal range"))
}
