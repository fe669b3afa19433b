//! # billwise
//!
//! Invoice arithmetic and bookkeeping hand-off for small-business invoicing:
//! line-item totals with discount and VAT, export to accounting software
//! (generic/Xero/Sage/Wave/FreshBooks CSV, QuickBooks IIF), and overdue
//! payment reminders.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point,
//! and are rounded half-up to cents only when presented.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use billwise::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("INV-0001", "Acme Ltd", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .client_email("billing@acme.test")
//!     .add_item(LineItem::new("Consulting", dec!(100), 2))
//!     .add_item(LineItem::new("Setup", dec!(50), 1))
//!     .discount(dec!(10))
//!     .vat(dec!(20))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(invoice.totals.subtotal, dec!(250.00));
//! assert_eq!(invoice.totals.total, dec!(270.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, totals calculation, validation, numbering |
//! | `export` | Accounting export (CSV family, QuickBooks IIF) |
//! | `reminder` | Overdue reminder planning and message rendering |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "export")]
pub mod export;

#[cfg(feature = "reminder")]
pub mod reminder;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
