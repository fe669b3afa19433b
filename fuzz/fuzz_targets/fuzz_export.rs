#![no_main]

use billwise::core::*;
use billwise::export::{ExportFormat, ExportOptionsBuilder, export};
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // Fields separated by '|': number, client, notes, item name, rate, discount, vat.
    let mut fields = s.split('|');
    let mut next = || fields.next().unwrap_or("");
    let (number, client, notes, item, rate, discount, vat) =
        (next(), next(), next(), next(), next(), next(), next());

    let rate = rate.parse::<Decimal>().unwrap_or(Decimal::ONE);
    let discount = discount.parse::<Decimal>().unwrap_or(Decimal::ZERO);
    let vat = vat.parse::<Decimal>().unwrap_or(Decimal::ZERO);
    let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    // Building must either succeed or return an error, never panic.
    let Ok(invoice) = InvoiceBuilder::new(number, client, date)
        .add_item(LineItem::new(item, rate, 3))
        .discount(discount)
        .vat(vat)
        .notes(notes)
        .build()
    else {
        return;
    };

    let _ = validate_invoice(&invoice);
    for line_detail in [false, true] {
        let options = ExportOptionsBuilder::new()
            .generated_on(date)
            .line_detail(line_detail)
            .build();
        for format in ExportFormat::ALL {
            let _ = export(std::slice::from_ref(&invoice), format, StatusFilter::All, &options);
        }
    }
});
