//! QuickBooks IIF (Intuit Interchange Format) ledger export.
//!
//! Tab-delimited, LF line endings. One `TRNS`/`SPL`/`ENDTRNS` block per
//! invoice: `TRNS` debits the receivable account with the invoice total and
//! `SPL` credits the income account with the exact negative.

use rust_decimal::Decimal;

use super::ExportOptions;
use crate::core::{Invoice, format_money, round_money};

const TRNS_HEADER: [&str; 9] = [
    "!TRNS", "TRNSTYPE", "DATE", "ACCNT", "NAME", "AMOUNT", "DOCNUM", "MEMO", "DUEDATE",
];
const SPL_HEADER: [&str; 8] = [
    "!SPL", "TRNSTYPE", "DATE", "ACCNT", "NAME", "AMOUNT", "DOCNUM", "MEMO",
];

pub(super) fn to_iif(invoices: &[&Invoice], options: &ExportOptions) -> String {
    let mut out = String::new();

    // Account block
    write_line(&mut out, &["!ACCNT", "NAME", "ACCNTTYPE"]);
    write_line(&mut out, &["ACCNT", &clean(&options.receivable_account), "AR"]);
    write_line(&mut out, &["ACCNT", &clean(&options.income_account), "INC"]);

    // Transaction layout
    write_line(&mut out, &TRNS_HEADER);
    write_line(&mut out, &SPL_HEADER);
    write_line(&mut out, &["!ENDTRNS"]);

    for inv in invoices {
        write_transaction(&mut out, inv, options);
    }

    out
}

fn write_transaction(out: &mut String, inv: &Invoice, options: &ExportOptions) {
    let date = inv.invoice_date.format("%m/%d/%Y").to_string();
    let due = inv.due_date.format("%m/%d/%Y").to_string();
    let name = clean(&inv.client_name);
    let docnum = clean(&inv.number);
    let memo = clean(
        inv.notes
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&format!("Invoice {}", inv.number)),
    );

    let (debit, credit) = balanced_amounts(inv.totals.total);

    write_line(
        out,
        &[
            "TRNS",
            "INVOICE",
            &date,
            &clean(&options.receivable_account),
            &name,
            &debit,
            &docnum,
            &memo,
            &due,
        ],
    );
    write_line(
        out,
        &[
            "SPL",
            "INVOICE",
            &date,
            &clean(&options.income_account),
            &name,
            &credit,
            &docnum,
            &memo,
        ],
    );
    write_line(out, &["ENDTRNS"]);
}

/// Debit and credit amounts for a total; the credit is the exact negative
/// of the debit, and zero is written as `0.00` on both sides.
fn balanced_amounts(total: Decimal) -> (String, String) {
    let debit = round_money(total);
    if debit.is_zero() {
        let zero = format_money(Decimal::ZERO);
        return (zero.clone(), zero);
    }
    (format_money(debit), format_money(-debit))
}

fn write_line(out: &mut String, fields: &[&str]) {
    out.push_str(&fields.join("\t"));
    out.push('\n');
}

/// IIF has no quoting, so field separators and line breaks become spaces.
fn clean(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect()
}
