#![no_main]

use billwise::core::*;
use billwise::reminder::{ReminderConfig, plan_reminders, render_reminder};
use chrono::{Days, NaiveDate};
use libfuzzer_sys::fuzz_target;
use rust_decimal_macros::dec;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (client, offset) = s.split_once('|').unwrap_or((s, "0"));
    let offset: u64 = offset.trim().parse().unwrap_or(0);

    let invoice_date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let Some(today) = invoice_date.checked_add_days(Days::new(offset)) else {
        return;
    };
    let Ok(invoice) = InvoiceBuilder::new("INV-FUZZ", client, invoice_date)
        .status(InvoiceStatus::Sent)
        .add_item(LineItem::new("Service", dec!(100), 1))
        .build()
    else {
        return;
    };

    // Templates take client text verbatim; rendering must not panic on braces.
    let plan = plan_reminders(std::slice::from_ref(&invoice), today);
    for notice in &plan.notices {
        let _ = render_reminder(&invoice, notice.tier, today, &ReminderConfig::default());
    }
});
