use billwise::core::*;
use billwise::export::{ExportOptionsBuilder, ExportResult, export_invoices};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn main() {
    let mut numbers = InvoiceNumberSequence::new("INV-");

    // A sent invoice with a discount and VAT
    let consulting = InvoiceBuilder::new(
        numbers.next_number().unwrap(),
        "Acme Ltd",
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
    )
    .client_email("billing@acme.test")
    .status(InvoiceStatus::Sent)
    .add_item(LineItem::new("Consulting", dec!(100), 2))
    .add_item(LineItem::new("Setup", dec!(50), 1).with_description("One-off onboarding"))
    .discount(dec!(10))
    .vat(dec!(20))
    .notes("Thanks for your business!")
    .build()
    .unwrap();

    // A paid hosting invoice without discount
    let hosting = InvoiceBuilder::new(
        numbers.next_number().unwrap(),
        "Globex",
        NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
    )
    .client_email("ap@globex.test")
    .status(InvoiceStatus::Paid)
    .add_item(LineItem::new("Hosting (monthly)", dec!(49.90), 1))
    .vat(dec!(20))
    .build()
    .unwrap();

    let t = &consulting.totals;
    println!("Invoice {}", consulting.number);
    println!("  Subtotal:  {}", format_money(t.subtotal));
    println!("  Discount: -{}", format_money(t.discount_amount));
    println!("  VAT:       {}", format_money(t.vat_amount));
    println!("  Total:     {}", format_money(t.total));
    println!();

    let invoices = [consulting, hosting];
    let options = ExportOptionsBuilder::new().line_detail(true).build();

    for format_id in ["generic_csv", "wave_csv", "quickbooks_iif"] {
        match export_invoices(&invoices, format_id, StatusFilter::All, &options) {
            Ok(ExportResult::Success {
                content,
                filename,
                count,
            }) => {
                println!("=== {filename} ({count} invoices) ===");
                println!("{content}");
            }
            Ok(ExportResult::Empty) => println!("No invoices to export as {format_id}"),
            Err(e) => eprintln!("Export failed: {e}"),
        }
    }

    // Only paid invoices
    let paid = export_invoices(
        &invoices,
        "sage_csv",
        StatusFilter::Only(InvoiceStatus::Paid),
        &options,
    )
    .unwrap();
    if let ExportResult::Success { count, .. } = paid {
        println!("Paid invoices exported for Sage: {count}");
    }

    // Unknown targets are rejected up front
    if let Err(e) = export_invoices(&invoices, "excel", StatusFilter::All, &options) {
        println!("Expected error: {e}");
    }
}
