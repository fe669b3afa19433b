use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use super::calculator::compute_financials;
use super::error::{InvoiceError, ValidationError, invalid_input};
use super::types::*;

/// Default payment term when no due date is given.
pub const DEFAULT_PAYMENT_DAYS: u64 = 30;

/// Builder for constructing invoices with derived totals.
///
/// ```
/// use billwise::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceBuilder::new("INV-0001", "Acme Ltd", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .client_email("billing@acme.test")
///     .add_item(LineItem::new("Consulting", dec!(100), 2))
///     .add_item(LineItem::new("Setup", dec!(50), 1))
///     .discount(dec!(10))
///     .vat(dec!(20))
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.totals.total, dec!(270.00));
/// assert_eq!(invoice.status, InvoiceStatus::Draft);
/// ```
pub struct InvoiceBuilder {
    number: String,
    client_name: String,
    client_email: String,
    invoice_date: NaiveDate,
    due_date: Option<NaiveDate>,
    status: InvoiceStatus,
    items: Vec<LineItem>,
    discount_pct: Decimal,
    vat_pct: Decimal,
    deposit: Option<Decimal>,
    notes: Option<String>,
}

impl InvoiceBuilder {
    pub fn new(
        number: impl Into<String>,
        client_name: impl Into<String>,
        invoice_date: NaiveDate,
    ) -> Self {
        Self {
            number: number.into(),
            client_name: client_name.into(),
            client_email: String::new(),
            invoice_date,
            due_date: None,
            status: InvoiceStatus::Draft,
            items: Vec::new(),
            discount_pct: Decimal::ZERO,
            vat_pct: Decimal::ZERO,
            deposit: None,
            notes: None,
        }
    }

    pub fn client_email(mut self, email: impl Into<String>) -> Self {
        self.client_email = email.into();
        self
    }

    /// Defaults to the invoice date plus [`DEFAULT_PAYMENT_DAYS`].
    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Initial status; new invoices start as [`InvoiceStatus::Draft`].
    pub fn status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = LineItem>) -> Self {
        self.items.extend(items);
        self
    }

    /// Discount percentage, `[0, 100]`.
    pub fn discount(mut self, pct: Decimal) -> Self {
        self.discount_pct = pct;
        self
    }

    /// VAT percentage, `[0, 100]`.
    pub fn vat(mut self, pct: Decimal) -> Self {
        self.vat_pct = pct;
        self
    }

    pub fn deposit(mut self, amount: Decimal) -> Self {
        self.deposit = Some(amount);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Build the invoice, computing its totals.
    ///
    /// Fails with `InvalidPercentage` or `InvalidInput` as
    /// [`compute_financials`] does, and with `InvalidInput` for an empty
    /// number, negative deposit, or a due date before the invoice date.
    pub fn build(self) -> Result<Invoice, InvoiceError> {
        let totals = compute_financials(&self.items, self.discount_pct, self.vat_pct)?;

        let mut errors = Vec::new();
        if self.number.trim().is_empty() {
            errors.push(ValidationError::new(
                "number",
                "invoice number must not be empty",
            ));
        }
        if self.number.len() > 200 {
            errors.push(ValidationError::new(
                "number",
                "invoice number cannot exceed 200 characters",
            ));
        }
        if self.deposit.is_some_and(|d| d < Decimal::ZERO) {
            errors.push(ValidationError::new(
                "deposit",
                "deposit must not be negative",
            ));
        }

        let due_date = match self.due_date {
            Some(d) => d,
            None => self
                .invoice_date
                .checked_add_days(Days::new(DEFAULT_PAYMENT_DAYS))
                .ok_or_else(|| {
                    InvoiceError::InvalidInput("invoice date is out of range".into())
                })?,
        };
        if due_date < self.invoice_date {
            errors.push(ValidationError::new(
                "due_date",
                "due date must not be before the invoice date",
            ));
        }

        if !errors.is_empty() {
            return Err(invalid_input(&errors));
        }

        Ok(Invoice {
            number: self.number,
            client_name: self.client_name,
            client_email: self.client_email,
            invoice_date: self.invoice_date,
            due_date,
            status: self.status,
            items: self.items,
            discount_pct: self.discount_pct,
            vat_pct: self.vat_pct,
            deposit: self.deposit,
            totals,
            notes: self.notes,
        })
    }
}
