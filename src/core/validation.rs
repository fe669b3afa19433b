use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::calculator::{compute_financials, round_money};
use super::error::{InvoiceError, ValidationError};
use super::types::*;

/// Validate line items for the calculator.
/// Returns all validation errors found (not just the first).
pub fn validate_line_items(items: &[LineItem]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if items.is_empty() {
        errors.push(ValidationError::new(
            "items",
            "at least one line item is required",
        ));
    }

    for (i, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("items[{i}].name"),
                "item name must not be empty",
            ));
        }
        if item.rate < Decimal::ZERO {
            errors.push(ValidationError::new(
                format!("items[{i}].rate"),
                format!("rate must not be negative, got {}", item.rate),
            ));
        }
        if item.quantity == 0 {
            errors.push(ValidationError::new(
                format!("items[{i}].quantity"),
                "quantity must be at least 1",
            ));
        }
    }

    errors
}

/// Reject a percentage outside `[0, 100]`.
pub fn check_percentage(field: &'static str, value: Decimal) -> Result<(), InvoiceError> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(InvoiceError::InvalidPercentage { field, value });
    }
    Ok(())
}

/// Validate a complete invoice record, e.g. one loaded from storage.
///
/// Besides field checks this verifies that the stored totals agree with
/// the line items to within one cent.
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if invoice.number.trim().is_empty() {
        errors.push(ValidationError::new(
            "number",
            "invoice number must not be empty",
        ));
    }
    if invoice.client_name.trim().is_empty() {
        errors.push(ValidationError::new(
            "client_name",
            "client name must not be empty",
        ));
    }
    if !is_plausible_email(&invoice.client_email) {
        errors.push(ValidationError::new(
            "client_email",
            format!("'{}' is not a valid email address", invoice.client_email),
        ));
    }
    if invoice.due_date < invoice.invoice_date {
        errors.push(ValidationError::new(
            "due_date",
            format!(
                "due date {} is before invoice date {}",
                invoice.due_date, invoice.invoice_date
            ),
        ));
    }
    if let Some(deposit) = invoice.deposit {
        if deposit < Decimal::ZERO {
            errors.push(ValidationError::new(
                "deposit",
                "deposit must not be negative",
            ));
        }
    }

    for (field, pct) in [
        ("discount_pct", invoice.discount_pct),
        ("vat_pct", invoice.vat_pct),
    ] {
        if pct < Decimal::ZERO || pct > dec!(100) {
            errors.push(ValidationError::new(
                field,
                format!("percentage {pct} must be between 0 and 100"),
            ));
        }
    }

    let item_errors = validate_line_items(&invoice.items);
    let items_ok = item_errors.is_empty();
    errors.extend(item_errors);

    if items_ok && errors.iter().all(|e| !e.field.ends_with("_pct")) {
        errors.extend(validate_arithmetic(invoice));
    }

    errors
}

/// Compare stored totals with freshly derived ones (tolerance: one cent).
pub fn validate_arithmetic(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let expected = match compute_financials(&invoice.items, invoice.discount_pct, invoice.vat_pct) {
        Ok(f) => f,
        Err(e) => {
            errors.push(ValidationError::new("totals", e.to_string()));
            return errors;
        }
    };

    let stored = &invoice.totals;
    for (field, got, want) in [
        ("totals.subtotal", stored.subtotal, expected.subtotal),
        (
            "totals.discount_amount",
            stored.discount_amount,
            expected.discount_amount,
        ),
        ("totals.taxable_base", stored.taxable_base, expected.taxable_base),
        ("totals.vat_amount", stored.vat_amount, expected.vat_amount),
        ("totals.total", stored.total, expected.total),
    ] {
        if (round_money(got) - round_money(want)).abs() > dec!(0.01) {
            errors.push(ValidationError::new(
                field,
                format!("stored {got} does not match computed {}", round_money(want)),
            ));
        }
    }

    errors
}

fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}
