use billwise::core::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn scenario_items() -> Vec<LineItem> {
    vec![
        LineItem::new("Consulting", dec!(100), 2),
        LineItem::new("Setup", dec!(50), 1),
    ]
}

// --- Calculator ---

#[test]
fn reference_scenario() {
    let f = compute_financials(&scenario_items(), dec!(10), dec!(20)).unwrap();
    let r = f.rounded();

    assert_eq!(r.subtotal, dec!(250.00));
    assert_eq!(r.discount_amount, dec!(25.00));
    assert_eq!(r.taxable_base, dec!(225.00));
    assert_eq!(r.vat_amount, dec!(45.00));
    assert_eq!(r.total, dec!(270.00));

    assert_eq!(format_money(r.total), "270.00");
}

#[test]
fn vat_is_charged_on_discounted_base() {
    // Charging VAT on the raw subtotal would give 250 * 1.2 - 25 = 275.
    let f = compute_financials(&scenario_items(), dec!(10), dec!(20)).unwrap();
    assert_ne!(f.total, dec!(275));
    assert_eq!(f.total, dec!(270));
}

#[test]
fn no_discount_no_vat() {
    let f = compute_financials(&scenario_items(), dec!(0), dec!(0)).unwrap();
    assert_eq!(f.subtotal, f.total);
    assert_eq!(f.discount_amount, Decimal::ZERO);
    assert_eq!(f.vat_amount, Decimal::ZERO);
}

#[test]
fn boundary_percentages_accepted() {
    assert!(compute_financials(&scenario_items(), dec!(0), dec!(100)).is_ok());
    let f = compute_financials(&scenario_items(), dec!(100), dec!(100)).unwrap();
    assert_eq!(f.total, Decimal::ZERO);
}

#[test]
fn fractional_rounding_half_up() {
    // 19.99 * 3 = 59.97; 7.5% discount = 4.49775; base 55.47225; 8.25% VAT = 4.576460625
    let items = [LineItem::new("Seat licence", dec!(19.99), 3)];
    let f = compute_financials(&items, dec!(7.5), dec!(8.25)).unwrap();
    assert_eq!(f.subtotal, dec!(59.97));
    assert_eq!(f.discount_amount, dec!(4.49775));
    assert_eq!(f.vat_amount, dec!(4.576460625));
    assert_eq!(f.total, dec!(60.048710625));

    let r = f.rounded();
    assert_eq!(r.discount_amount, dec!(4.50));
    assert_eq!(r.vat_amount, dec!(4.58));
    assert_eq!(r.total, dec!(60.05));
}

#[test]
fn invalid_items_rejected() {
    let err = compute_financials(&[LineItem::new("  ", dec!(10), 1)], dec!(0), dec!(0))
        .unwrap_err();
    match err {
        InvoiceError::InvalidInput(msg) => assert!(msg.contains("items[0].name"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }

    let err = compute_financials(&[LineItem::new("Hours", dec!(10), 0)], dec!(0), dec!(0))
        .unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidInput(_)));

    let err = compute_financials(&[LineItem::new("Hours", dec!(-10), 1)], dec!(0), dec!(0))
        .unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidInput(_)));
}

#[test]
fn empty_items_are_invalid_input() {
    let err = compute_financials(&[], dec!(10), dec!(20)).unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidInput(_)));
}

#[test]
fn percentage_errors_name_the_field() {
    let err = compute_financials(&scenario_items(), dec!(0), dec!(120)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid percentage for vat: 120 (must be between 0 and 100)"
    );
}

// --- Builder ---

#[test]
fn builder_derives_totals_and_defaults() {
    let inv = InvoiceBuilder::new("INV-0001", "Acme Ltd", date(2024, 6, 15))
        .client_email("billing@acme.test")
        .items(scenario_items())
        .discount(dec!(10))
        .vat(dec!(20))
        .deposit(dec!(50))
        .build()
        .unwrap();

    assert_eq!(inv.status, InvoiceStatus::Draft);
    assert_eq!(inv.due_date, date(2024, 7, 15));
    assert_eq!(inv.totals.total, dec!(270));
    // Deposit is informational and does not reduce the total.
    assert_eq!(inv.deposit, Some(dec!(50)));
    assert!(validate_invoice(&inv).is_empty());
}

#[test]
fn builder_rejects_bad_fields() {
    let err = InvoiceBuilder::new("", "Acme Ltd", date(2024, 6, 15))
        .add_item(LineItem::new("Consulting", dec!(100), 1))
        .deposit(dec!(-1))
        .due_date(date(2024, 6, 1))
        .build()
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("number"), "{msg}");
    assert!(msg.contains("deposit"), "{msg}");
    assert!(msg.contains("due_date"), "{msg}");
}

#[test]
fn builder_requires_items() {
    let err = InvoiceBuilder::new("INV-0001", "Acme Ltd", date(2024, 6, 15))
        .build()
        .unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidInput(_)));
}

// --- Lifecycle ---

#[test]
fn lifecycle_draft_to_paid() {
    let mut inv = InvoiceBuilder::new("INV-0002", "Acme Ltd", date(2024, 6, 15))
        .add_item(LineItem::new("Consulting", dec!(100), 1))
        .build()
        .unwrap();

    inv.mark_sent().unwrap();
    assert_eq!(inv.status, InvoiceStatus::Sent);
    inv.transition(InvoiceStatus::Overdue).unwrap();
    inv.transition(InvoiceStatus::Partial).unwrap();
    inv.transition(InvoiceStatus::Paid).unwrap();

    let err = inv.transition(InvoiceStatus::Sent).unwrap_err();
    assert!(matches!(
        err,
        InvoiceError::InvalidTransition {
            from: InvoiceStatus::Paid,
            to: InvoiceStatus::Sent
        }
    ));
    assert_eq!(err.to_string(), "cannot move invoice from paid to sent");
}

// --- Transport ---

#[test]
fn decimals_travel_as_strings() {
    let inv = InvoiceBuilder::new("INV-0003", "Acme Ltd", date(2024, 6, 15))
        .client_email("billing@acme.test")
        .items(scenario_items())
        .discount(dec!(10))
        .vat(dec!(20))
        .build()
        .unwrap();

    let json = serde_json::to_value(&inv).unwrap();
    assert_eq!(json["invoiceNumber"], "INV-0003");
    assert_eq!(json["status"], "draft");
    assert_eq!(json["invoiceDate"], "2024-06-15");
    assert_eq!(json["items"][0]["rate"], "100");
    assert!(json.get("totals").is_none());
    let total = json["total"].as_str().expect("total is a string");
    assert_eq!(total.parse::<Decimal>().unwrap(), dec!(270));
    assert_eq!(json["discount"].as_str().unwrap().parse::<Decimal>().unwrap(), dec!(25));
    assert_eq!(json["vat"].as_str().unwrap().parse::<Decimal>().unwrap(), dec!(45));

    let back: Invoice = serde_json::from_value(json).unwrap();
    assert_eq!(back, inv);
}

#[test]
fn deserialise_from_persistence_shape() {
    // Flat money fields, no stored percentages.
    let json = r#"{
        "invoiceNumber": "INV-0042",
        "clientName": "Globex",
        "clientEmail": "ap@globex.test",
        "invoiceDate": "2024-01-10",
        "dueDate": "2024-02-09",
        "status": "pending",
        "items": [{"name": "Retainer", "rate": "1200.00", "quantity": 1}],
        "subtotal": "1200.00",
        "discount": "120.00",
        "vat": "216.00",
        "total": "1296.00"
    }"#;
    let inv: Invoice = serde_json::from_str(json).unwrap();
    assert_eq!(inv.status, InvoiceStatus::Pending);
    assert_eq!(inv.items[0].amount(), Some(dec!(1200)));
    assert_eq!(inv.discount_pct, dec!(10));
    assert_eq!(inv.vat_pct, dec!(20));
    assert_eq!(inv.totals.taxable_base, dec!(1080));
    assert_eq!(inv.totals.total, dec!(1296));
    assert!(inv.notes.is_none());
    assert!(inv.deposit.is_none());
    assert!(validate_invoice(&inv).is_empty());
}

#[test]
fn stored_percentages_take_precedence() {
    let json = r#"{
        "invoiceNumber": "INV-0043",
        "clientName": "Globex",
        "clientEmail": "ap@globex.test",
        "invoiceDate": "2024-01-10",
        "dueDate": "2024-02-09",
        "status": "sent",
        "items": [{"name": "Retainer", "rate": "0", "quantity": 1}],
        "subtotal": "0",
        "discount": "0",
        "vat": "0",
        "total": "0",
        "discountPct": "5",
        "vatPct": "19",
        "deposit": "100",
        "notes": "Pro bono"
    }"#;
    let inv: Invoice = serde_json::from_str(json).unwrap();
    assert_eq!(inv.discount_pct, dec!(5));
    assert_eq!(inv.vat_pct, dec!(19));
    assert_eq!(inv.deposit, Some(dec!(100)));
    assert_eq!(inv.notes.as_deref(), Some("Pro bono"));
}

#[test]
fn zero_subtotal_derives_zero_percentages() {
    let json = r#"{
        "invoiceNumber": "INV-0044",
        "clientName": "Globex",
        "clientEmail": "ap@globex.test",
        "invoiceDate": "2024-01-10",
        "dueDate": "2024-02-09",
        "status": "draft",
        "items": [{"name": "Goodwill", "rate": "0", "quantity": 1}],
        "subtotal": "0",
        "discount": "0",
        "vat": "0",
        "total": "0"
    }"#;
    let inv: Invoice = serde_json::from_str(json).unwrap();
    assert_eq!(inv.discount_pct, Decimal::ZERO);
    assert_eq!(inv.vat_pct, Decimal::ZERO);
}

#[test]
fn nested_totals_shape_is_rejected() {
    let json = r#"{
        "invoiceNumber": "INV-0045",
        "clientName": "Globex",
        "clientEmail": "ap@globex.test",
        "invoiceDate": "2024-01-10",
        "dueDate": "2024-02-09",
        "status": "draft",
        "items": [],
        "totals": {"subtotal": "0", "discountAmount": "0", "taxableBase": "0", "vatAmount": "0", "total": "0"}
    }"#;
    assert!(serde_json::from_str::<Invoice>(json).is_err());
}

#[test]
fn status_filter_travels_as_plain_text() {
    let filters = [StatusFilter::All, StatusFilter::Only(InvoiceStatus::Overdue)];
    let json = serde_json::to_string(&filters).unwrap();
    assert_eq!(json, r#"["all","overdue"]"#);
    let back: Vec<StatusFilter> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, filters);
}

// --- Numbering ---

#[test]
fn numbering_feeds_builder() {
    let settings = InvoiceSettings {
        invoice_prefix: "ACME-".into(),
        next_invoice_number: 7,
    };
    let mut seq = InvoiceNumberSequence::from_settings(&settings).unwrap();

    let inv = InvoiceBuilder::new(seq.next_number().unwrap(), "Acme Ltd", date(2024, 6, 15))
        .add_item(LineItem::new("Consulting", dec!(100), 1))
        .build()
        .unwrap();

    assert_eq!(inv.number, "ACME-0007");
    assert_eq!(seq.settings().next_invoice_number, 8);
}
