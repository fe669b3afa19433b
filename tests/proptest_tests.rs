//! Property-based tests and edge case tests for the billwise crate.
//!
//! Run with: `cargo test --features all --test proptest_tests`

#![cfg(feature = "export")]

use billwise::core::*;
use billwise::export::*;
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn options() -> ExportOptions {
    ExportOptionsBuilder::new()
        .generated_on(date(2024, 7, 1))
        .build()
}

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Generate a reasonable rate (0.00 to 99999.99).
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0u64..10_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// Generate a percentage with two decimals (0.00 to 100.00).
fn arb_pct() -> impl Strategy<Value = Decimal> {
    (0u32..=10_000u32).prop_map(|bp| Decimal::new(i64::from(bp), 2))
}

/// Generate a valid line item.
fn arb_line() -> impl Strategy<Value = LineItem> {
    ("[A-Za-z][A-Za-z0-9 ]{0,15}", arb_rate(), 1u32..=100u32)
        .prop_map(|(name, rate, qty)| LineItem::new(name, rate, qty))
}

/// Generate 1-5 valid line items.
fn arb_lines() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(arb_line(), 1..=5)
}

fn arb_status() -> impl Strategy<Value = InvoiceStatus> {
    prop::sample::select(InvoiceStatus::ALL.to_vec())
}

/// Generate an invoice with awkward but single-line client names.
fn arb_invoice() -> impl Strategy<Value = Invoice> {
    (
        "[A-Za-z][A-Za-z0-9 ,\"'&.-]{0,19}",
        arb_lines(),
        arb_pct(),
        arb_pct(),
        arb_status(),
    )
        .prop_map(|(client, items, discount, vat, status)| {
            InvoiceBuilder::new("PROP", client, date(2024, 6, 15))
                .client_email("ap@client.test")
                .items(items)
                .discount(discount)
                .vat(vat)
                .status(status)
                .build()
                .unwrap()
        })
}

/// Generate 1-8 invoices numbered in order.
fn arb_invoices() -> impl Strategy<Value = Vec<Invoice>> {
    prop::collection::vec(arb_invoice(), 1..=8).prop_map(|mut invoices| {
        for (i, inv) in invoices.iter_mut().enumerate() {
            inv.number = format!("INV-{:04}", i + 1);
        }
        invoices
    })
}

// ── Property Tests ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn subtotal_is_sum_of_line_amounts(lines in arb_lines(), d in arb_pct(), v in arb_pct()) {
        let f = compute_financials(&lines, d, v).unwrap();
        let sum: Decimal = lines.iter().map(|l| l.amount().unwrap()).sum();
        prop_assert_eq!(f.subtotal, sum);
    }

    #[test]
    fn total_follows_discount_then_vat(lines in arb_lines(), d in arb_pct(), v in arb_pct()) {
        let f = compute_financials(&lines, d, v).unwrap();
        let base = f.subtotal - f.subtotal * d / dec!(100);
        let expected = base + base * v / dec!(100);

        prop_assert_eq!(f.taxable_base, f.subtotal - f.discount_amount);
        prop_assert_eq!(f.total, f.taxable_base + f.vat_amount);
        prop_assert_eq!(round_money(f.total), round_money(expected));
    }

    #[test]
    fn calculation_is_deterministic(lines in arb_lines(), d in arb_pct(), v in arb_pct()) {
        let a = compute_financials(&lines, d, v).unwrap();
        let b = compute_financials(&lines, d, v).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn total_is_never_negative(lines in arb_lines(), d in arb_pct(), v in arb_pct()) {
        let f = compute_financials(&lines, d, v).unwrap();
        prop_assert!(f.total >= Decimal::ZERO);
        prop_assert!(f.discount_amount <= f.subtotal);
    }

    #[test]
    fn more_discount_never_raises_total(lines in arb_lines(), d1 in arb_pct(), d2 in arb_pct(), v in arb_pct()) {
        let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        let a = compute_financials(&lines, lo, v).unwrap();
        let b = compute_financials(&lines, hi, v).unwrap();
        prop_assert!(b.total <= a.total);
    }

    #[test]
    fn built_invoices_pass_validation(inv in arb_invoice()) {
        let errors = validate_invoice(&inv);
        prop_assert!(errors.is_empty(), "validation errors: {:?}", errors);
    }

    #[test]
    fn csv_has_one_row_per_invoice_in_order(invoices in arb_invoices()) {
        for format in [
            ExportFormat::GenericCsv,
            ExportFormat::XeroCsv,
            ExportFormat::SageCsv,
            ExportFormat::WaveCsv,
            ExportFormat::FreshbooksCsv,
        ] {
            let ExportResult::Success { content, count, .. } =
                export(&invoices, format, StatusFilter::All, &options())
            else {
                panic!("non-empty input must export");
            };
            prop_assert_eq!(count, invoices.len());

            let rows: Vec<&str> = content.split("\r\n").skip(1).filter(|r| !r.is_empty()).collect();
            prop_assert_eq!(rows.len(), invoices.len());
            for (row, inv) in rows.iter().zip(&invoices) {
                let prefix = format!("\"{}\",", inv.number);
                prop_assert!(row.starts_with(&prefix), "{} does not start with {}", row, prefix);
            }
        }
    }

    #[test]
    fn status_filter_exports_only_matching(invoices in arb_invoices(), status in arb_status()) {
        let expected = invoices.iter().filter(|i| i.status == status).count();
        match export(&invoices, ExportFormat::GenericCsv, StatusFilter::Only(status), &options()) {
            ExportResult::Empty => prop_assert_eq!(expected, 0),
            ExportResult::Success { count, .. } => prop_assert_eq!(count, expected),
        }
    }

    #[test]
    fn iif_split_negates_transaction(invoices in arb_invoices()) {
        let ExportResult::Success { content, .. } =
            export(&invoices, ExportFormat::QuickbooksIif, StatusFilter::All, &options())
        else {
            panic!("non-empty input must export");
        };

        let amount = |line: &str| -> Decimal { line.split('\t').nth(5).unwrap().parse().unwrap() };
        let trns: Vec<Decimal> = content.lines().filter(|l| l.starts_with("TRNS\t")).map(amount).collect();
        let spl: Vec<Decimal> = content.lines().filter(|l| l.starts_with("SPL\t")).map(amount).collect();

        prop_assert_eq!(trns.len(), invoices.len());
        prop_assert_eq!(spl.len(), invoices.len());
        for ((t, s), inv) in trns.iter().zip(&spl).zip(&invoices) {
            prop_assert_eq!(*t, round_money(inv.totals.total));
            prop_assert_eq!(*t + *s, Decimal::ZERO);
        }
    }
}

// ── Edge Case Tests ─────────────────────────────────────────────────────────

#[test]
fn unicode_client_names() {
    let names = ["日本語会社", "Kundé & Söhne", "شركة عربية", "José García"];

    for name in names {
        let inv = InvoiceBuilder::new("INV-UNI", name, date(2024, 6, 15))
            .client_email("ap@client.test")
            .add_item(LineItem::new("Service", dec!(100), 1))
            .build()
            .unwrap();

        for format in ExportFormat::ALL {
            let ExportResult::Success { content, .. } =
                export(std::slice::from_ref(&inv), format, StatusFilter::All, &options())
            else {
                panic!("non-empty input must export");
            };
            assert!(content.contains(name), "{format} lost {name}");
        }
    }
}

#[test]
fn many_line_items() {
    let items: Vec<LineItem> = (1..=1000)
        .map(|i| LineItem::new(format!("Item {i}"), dec!(9.99), 2))
        .collect();
    let inv = InvoiceBuilder::new("INV-BIG", "Acme Ltd", date(2024, 6, 15))
        .items(items)
        .vat(dec!(20))
        .build()
        .unwrap();

    assert_eq!(inv.totals.subtotal, dec!(19980.00));
    assert_eq!(inv.totals.total, dec!(23976.00));

    let opts = ExportOptionsBuilder::new()
        .generated_on(date(2024, 7, 1))
        .line_detail(true)
        .build();
    let ExportResult::Success { content, count, .. } =
        export(&[inv], ExportFormat::XeroCsv, StatusFilter::All, &opts)
    else {
        panic!("non-empty input must export");
    };
    assert_eq!(count, 1);
    assert_eq!(content.matches("\r\n").count(), 1001);
}

#[test]
fn zero_total_invoice_exports_zero_amounts() {
    let inv = InvoiceBuilder::new("INV-ZERO", "Acme Ltd", date(2024, 6, 15))
        .add_item(LineItem::new("Goodwill", dec!(0), 1))
        .vat(dec!(20))
        .build()
        .unwrap();
    assert_eq!(inv.totals.total, Decimal::ZERO);

    let ExportResult::Success { content, .. } =
        export(&[inv], ExportFormat::QuickbooksIif, StatusFilter::All, &options())
    else {
        panic!("non-empty input must export");
    };
    assert!(!content.contains("-0.00"));
    assert_eq!(content.matches("\t0.00\t").count(), 2);
}

#[test]
fn large_values_overflow_cleanly() {
    let items = [LineItem::new("Everything", Decimal::MAX, 2)];
    let err = compute_financials(&items, dec!(0), dec!(0)).unwrap_err();
    assert!(matches!(err, InvoiceError::Arithmetic(_)));
}

#[test]
fn long_invoice_number() {
    let ok = InvoiceBuilder::new("X".repeat(200), "Acme Ltd", date(2024, 6, 15))
        .add_item(LineItem::new("Service", dec!(1), 1))
        .build();
    assert!(ok.is_ok());

    let err = InvoiceBuilder::new("X".repeat(201), "Acme Ltd", date(2024, 6, 15))
        .add_item(LineItem::new("Service", dec!(1), 1))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("200 characters"));
}
