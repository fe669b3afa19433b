//! Core invoice types, totals calculation, validation, and numbering.
//!
//! Money is [`rust_decimal::Decimal`] throughout; rounding to cents happens
//! only when values are presented.

mod builder;
mod calculator;
mod error;
mod numbering;
mod types;
mod validation;

pub use builder::*;
pub use calculator::*;
pub use error::{InvoiceError, ValidationError};
pub use numbering::*;
pub use types::*;
pub use validation::*;
