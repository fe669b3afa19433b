use billwise::core::*;
use billwise::reminder::{ReminderConfigBuilder, plan_reminders, render_reminder};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn invoice(number: &str, client: &str, due: NaiveDate, status: InvoiceStatus) -> Invoice {
    InvoiceBuilder::new(number, client, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
        .client_email(format!("ap@{}.test", client.to_lowercase()))
        .due_date(due)
        .status(status)
        .add_item(LineItem::new("Retainer", dec!(1200), 1))
        .vat(dec!(20))
        .build()
        .unwrap()
}

fn main() {
    let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    let invoices = [
        invoice("INV-0001", "Acme", NaiveDate::from_ymd_opt(2024, 6, 27).unwrap(), InvoiceStatus::Sent),
        invoice("INV-0002", "Globex", NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(), InvoiceStatus::Overdue),
        invoice("INV-0003", "Initech", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), InvoiceStatus::Partial),
        invoice("INV-0004", "Umbrella", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), InvoiceStatus::Paid),
        invoice("INV-0005", "Hooli", NaiveDate::from_ymd_opt(2024, 7, 31).unwrap(), InvoiceStatus::Sent),
    ];

    let config = ReminderConfigBuilder::new("Billwise Consulting")
        .currency_symbol("£")
        .build();

    let plan = plan_reminders(&invoices, today);
    for skipped in &plan.skipped {
        println!("skip {} ({:?})", skipped.invoice_number, skipped.reason);
    }

    for notice in &plan.notices {
        let Some(invoice) = invoices.iter().find(|i| i.number == notice.invoice_number) else {
            continue;
        };
        let message = render_reminder(invoice, notice.tier, today, &config);
        println!();
        println!("--- {} reminder, {} days overdue ---", notice.tier.id(), notice.days_overdue);
        println!("To: {}", message.to);
        println!("Subject: {}", message.subject);
        println!();
        println!("{}", message.body);
    }
}
