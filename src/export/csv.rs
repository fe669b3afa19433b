//! CSV family: one header row, then one row per invoice (or per line item
//! when line detail is requested and the target supports it).
//!
//! Comma separated, CRLF line endings. The header row is bare; text fields
//! are always quoted with embedded quotes doubled; dates (`YYYY-MM-DD`) and
//! money (`0.00`) are bare.

use rust_decimal::Decimal;

use super::{ExportFormat, ExportOptions};
use crate::core::{Invoice, LineItem, format_money};

/// Column layout and conventions of one CSV target.
///
/// Every target writes the same eleven base fields in the same order:
/// number, client name, client email, invoice date, due date, status,
/// subtotal, discount, VAT, total, notes.
pub(super) struct CsvProfile {
    base_headers: [&'static str; 11],
    status_case: StatusCase,
    extras: &'static [(&'static str, Extra)],
    /// Headers for item name, description, quantity, rate, amount.
    line_headers: Option<[&'static str; 5]>,
    /// Leave the money columns blank on all but the first row of an invoice.
    totals_on_first_line_only: bool,
}

#[derive(Clone, Copy)]
enum StatusCase {
    Title,
    Upper,
}

#[derive(Clone, Copy)]
enum Extra {
    AccountCode,
    TaxType,
    TaxName,
    TaxRate,
    Currency,
}

const GENERIC: CsvProfile = CsvProfile {
    base_headers: [
        "Invoice Number",
        "Client Name",
        "Client Email",
        "Invoice Date",
        "Due Date",
        "Status",
        "Subtotal",
        "Discount",
        "VAT",
        "Total",
        "Notes",
    ],
    status_case: StatusCase::Title,
    extras: &[],
    line_headers: None,
    totals_on_first_line_only: false,
};

const XERO: CsvProfile = CsvProfile {
    base_headers: [
        "InvoiceNumber",
        "ContactName",
        "EmailAddress",
        "InvoiceDate",
        "DueDate",
        "Status",
        "SubTotal",
        "Discount",
        "TaxTotal",
        "Total",
        "Reference",
    ],
    status_case: StatusCase::Upper,
    extras: &[
        ("AccountCode", Extra::AccountCode),
        ("TaxType", Extra::TaxType),
        ("Currency", Extra::Currency),
    ],
    line_headers: Some([
        "ItemName",
        "Description",
        "Quantity",
        "UnitAmount",
        "LineAmount",
    ]),
    totals_on_first_line_only: false,
};

const SAGE: CsvProfile = CsvProfile {
    base_headers: [
        "Invoice_No",
        "Customer",
        "Customer_Email",
        "Date",
        "Due_Date",
        "Status",
        "Net_Amount",
        "Discount_Amount",
        "Tax_Amount",
        "Total_Amount",
        "Notes",
    ],
    status_case: StatusCase::Title,
    extras: &[("Tax_Rate", Extra::TaxRate), ("Currency", Extra::Currency)],
    line_headers: None,
    totals_on_first_line_only: false,
};

const WAVE: CsvProfile = CsvProfile {
    base_headers: [
        "Invoice number",
        "Customer name",
        "Customer email",
        "Invoice date",
        "Due date",
        "Invoice status",
        "Subtotal",
        "Discount",
        "Tax amount",
        "Invoice total",
        "Memo",
    ],
    status_case: StatusCase::Title,
    extras: &[("Tax name", Extra::TaxName), ("Tax rate", Extra::TaxRate)],
    line_headers: Some(["Product/Service", "Description", "Quantity", "Rate", "Amount"]),
    totals_on_first_line_only: true,
};

const FRESHBOOKS: CsvProfile = CsvProfile {
    base_headers: [
        "Invoice Number",
        "Client Name",
        "Email",
        "Date Issued",
        "Due Date",
        "Status",
        "Subtotal",
        "Discount",
        "Tax",
        "Total",
        "Notes",
    ],
    status_case: StatusCase::Title,
    extras: &[("Currency", Extra::Currency)],
    line_headers: None,
    totals_on_first_line_only: false,
};

/// Column profile for a CSV target; `None` for non-CSV formats.
pub(super) fn profile(format: ExportFormat) -> Option<&'static CsvProfile> {
    match format {
        ExportFormat::GenericCsv => Some(&GENERIC),
        ExportFormat::XeroCsv => Some(&XERO),
        ExportFormat::SageCsv => Some(&SAGE),
        ExportFormat::WaveCsv => Some(&WAVE),
        ExportFormat::FreshbooksCsv => Some(&FRESHBOOKS),
        ExportFormat::QuickbooksIif => None,
    }
}

pub(super) fn to_csv(invoices: &[&Invoice], profile: &CsvProfile, options: &ExportOptions) -> String {
    let line_headers = profile.line_headers.filter(|_| options.line_detail);

    let mut out = String::new();
    let headers = profile
        .base_headers
        .iter()
        .chain(profile.extras.iter().map(|(h, _)| h))
        .chain(line_headers.iter().flatten());
    for (i, h) in headers.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(h);
    }
    out.push_str("\r\n");

    for inv in invoices {
        if line_headers.is_some() && inv.items.is_empty() {
            write_base(&mut out, inv, profile, true);
            write_extras(&mut out, inv, profile, options);
            out.push_str(",,,,,\r\n");
        } else if line_headers.is_some() {
            for (i, item) in inv.items.iter().enumerate() {
                let with_totals = i == 0 || !profile.totals_on_first_line_only;
                write_base(&mut out, inv, profile, with_totals);
                write_extras(&mut out, inv, profile, options);
                write_line(&mut out, item);
                out.push_str("\r\n");
            }
        } else {
            write_base(&mut out, inv, profile, true);
            write_extras(&mut out, inv, profile, options);
            out.push_str("\r\n");
        }
    }

    out
}

fn write_base(out: &mut String, inv: &Invoice, profile: &CsvProfile, with_totals: bool) {
    csv_field_str(out, &inv.number);
    out.push(',');
    csv_field_str(out, &inv.client_name);
    out.push(',');
    csv_field_str(out, &inv.client_email);
    out.push(',');
    out.push_str(&inv.invoice_date.format("%Y-%m-%d").to_string());
    out.push(',');
    out.push_str(&inv.due_date.format("%Y-%m-%d").to_string());
    out.push(',');
    let status = match profile.status_case {
        StatusCase::Title => inv.status.label().to_string(),
        StatusCase::Upper => inv.status.label().to_uppercase(),
    };
    csv_field_str(out, &status);
    out.push(',');

    let t = &inv.totals;
    for amount in [t.subtotal, t.discount_amount, t.vat_amount, t.total] {
        if with_totals {
            out.push_str(&format_money(amount));
        }
        out.push(',');
    }

    csv_field_str(out, inv.notes.as_deref().unwrap_or(""));
}

fn write_extras(out: &mut String, inv: &Invoice, profile: &CsvProfile, options: &ExportOptions) {
    for (_, extra) in profile.extras {
        out.push(',');
        match extra {
            Extra::AccountCode => csv_field_str(out, &options.account_code),
            Extra::TaxType => csv_field_str(out, &options.tax_type),
            Extra::Currency => csv_field_str(out, &options.currency),
            Extra::TaxName => {
                let name = if inv.vat_pct > Decimal::ZERO { "VAT" } else { "" };
                csv_field_str(out, name);
            }
            Extra::TaxRate => csv_field_str(out, &format!("{}%", inv.vat_pct.normalize())),
        }
    }
}

fn write_line(out: &mut String, item: &LineItem) {
    out.push(',');
    csv_field_str(out, &item.name);
    out.push(',');
    csv_field_str(out, item.description.as_deref().unwrap_or(""));
    out.push(',');
    out.push_str(&item.quantity.to_string());
    out.push(',');
    out.push_str(&format_money(item.rate));
    out.push(',');
    if let Some(amount) = item.amount() {
        out.push_str(&format_money(amount));
    }
}

fn csv_field_str(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}
