//! Overdue payment reminders.
//!
//! Classifies overdue invoices into escalating reminder tiers and renders
//! the reminder text. Delivery is left to the caller's mail transport.
//!
//! # Example
//!
//! ```
//! use billwise::core::*;
//! use billwise::reminder::*;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("INV-0007", "Acme Ltd", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
//!     .client_email("billing@acme.test")
//!     .due_date(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap())
//!     .status(InvoiceStatus::Sent)
//!     .add_item(LineItem::new("Consulting", dec!(100), 2))
//!     .build()
//!     .unwrap();
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
//! let plan = plan_reminders(&[invoice.clone()], today);
//! assert_eq!(plan.notices[0].tier, ReminderTier::Urgent);
//!
//! let message = render_reminder(&invoice, plan.notices[0].tier, today, &ReminderConfig::default());
//! assert_eq!(message.subject, "URGENT: Payment Required - Invoice INV-0007");
//! ```

mod template;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{Invoice, InvoiceStatus, format_money};

/// Reminder severity, escalating with the number of days overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderTier {
    /// Up to 7 days overdue.
    Gentle,
    /// 8 to 30 days overdue.
    Urgent,
    /// More than 30 days overdue.
    Final,
}

impl ReminderTier {
    pub fn for_days_overdue(days: i64) -> Self {
        if days <= 7 {
            Self::Gentle
        } else if days <= 30 {
            Self::Urgent
        } else {
            Self::Final
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Gentle => "gentle",
            Self::Urgent => "urgent",
            Self::Final => "final",
        }
    }
}

/// Calendar days between the due date and `today`; zero or negative when
/// the invoice is not yet overdue.
pub fn days_overdue(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - due_date).num_days()
}

/// Configuration for rendered reminders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Signature line of every reminder.
    pub company_name: String,
    /// Prefix for amounts, e.g. "$" or "€".
    pub currency_symbol: String,
    /// Days from today until the deadline quoted in final notices.
    pub final_notice_days: u64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            company_name: "Your Company".into(),
            currency_symbol: "$".into(),
            final_notice_days: 7,
        }
    }
}

/// Builder for [`ReminderConfig`].
#[derive(Debug, Default)]
pub struct ReminderConfigBuilder {
    config: ReminderConfig,
}

impl ReminderConfigBuilder {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            config: ReminderConfig {
                company_name: company_name.into(),
                ..Default::default()
            },
        }
    }

    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.config.currency_symbol = symbol.into();
        self
    }

    pub fn final_notice_days(mut self, days: u64) -> Self {
        self.config.final_notice_days = days;
        self
    }

    pub fn build(self) -> ReminderConfig {
        self.config
    }
}

/// An invoice that should receive a reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderNotice {
    pub invoice_number: String,
    pub client_name: String,
    pub client_email: String,
    pub days_overdue: i64,
    pub tier: ReminderTier,
}

/// Why an invoice was left out of a reminder run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    AlreadyPaid,
    /// Drafts have never been sent to the client.
    NotSent,
    NotOverdue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedInvoice {
    pub invoice_number: String,
    pub reason: SkipReason,
}

/// Result of [`plan_reminders`]: notices and skips, each in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderPlan {
    pub notices: Vec<ReminderNotice>,
    pub skipped: Vec<SkippedInvoice>,
}

/// Decide which invoices need a reminder as of `today`, and at which tier.
pub fn plan_reminders(invoices: &[Invoice], today: NaiveDate) -> ReminderPlan {
    let mut plan = ReminderPlan::default();

    for inv in invoices {
        let days = days_overdue(inv.due_date, today);
        let skip = match inv.status {
            InvoiceStatus::Paid => Some(SkipReason::AlreadyPaid),
            InvoiceStatus::Draft => Some(SkipReason::NotSent),
            _ if days <= 0 => Some(SkipReason::NotOverdue),
            _ => None,
        };

        match skip {
            Some(reason) => plan.skipped.push(SkippedInvoice {
                invoice_number: inv.number.clone(),
                reason,
            }),
            None => plan.notices.push(ReminderNotice {
                invoice_number: inv.number.clone(),
                client_name: inv.client_name.clone(),
                client_email: inv.client_email.clone(),
                days_overdue: days,
                tier: ReminderTier::for_days_overdue(days),
            }),
        }
    }

    tracing::debug!(
        %today,
        notices = plan.notices.len(),
        skipped = plan.skipped.len(),
        "planned overdue reminders"
    );

    plan
}

/// A rendered reminder, ready to hand to a mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Render the reminder text for `invoice` at the given tier.
pub fn render_reminder(
    invoice: &Invoice,
    tier: ReminderTier,
    today: NaiveDate,
    config: &ReminderConfig,
) -> ReminderMessage {
    let days = days_overdue(invoice.due_date, today).max(0);
    let deadline = today
        .checked_add_days(Days::new(config.final_notice_days))
        .unwrap_or(today);

    let total = format!(
        "{}{}",
        config.currency_symbol,
        format_money(invoice.totals.total)
    );
    let due_date = invoice.due_date.format("%B %d, %Y").to_string();
    let days = days.to_string();
    let final_deadline = deadline.format("%B %d, %Y").to_string();

    let vars = [
        ("client_name", invoice.client_name.as_str()),
        ("invoice_number", invoice.number.as_str()),
        ("total_amount", total.as_str()),
        ("due_date", due_date.as_str()),
        ("days_overdue", days.as_str()),
        ("company_name", config.company_name.as_str()),
        ("final_deadline", final_deadline.as_str()),
    ];

    let (subject, body) = template::for_tier(tier);
    ReminderMessage {
        to: invoice.client_email.clone(),
        subject: template::fill(subject, &vars),
        body: template::fill(body, &vars),
    }
}
