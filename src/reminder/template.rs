//! Reminder wording per tier, with `{name}` placeholders.

use super::ReminderTier;

const GENTLE_SUBJECT: &str = "Friendly Payment Reminder - Invoice {invoice_number}";
const GENTLE_BODY: &str = "Dear {client_name},

This is a friendly reminder that invoice #{invoice_number} for {total_amount} was due on {due_date}.

Invoice Details:
- Invoice Number: {invoice_number}
- Amount: {total_amount}
- Due Date: {due_date}
- Days Overdue: {days_overdue}

If you have any questions about this invoice or need to discuss payment terms, please reach out.

Thank you for your business!

Best regards,
{company_name}";

const URGENT_SUBJECT: &str = "URGENT: Payment Required - Invoice {invoice_number}";
const URGENT_BODY: &str = "Dear {client_name},

This is an urgent reminder that invoice #{invoice_number} for {total_amount} is now {days_overdue} days overdue.

Invoice Details:
- Invoice Number: {invoice_number}
- Amount: {total_amount}
- Due Date: {due_date}
- Days Overdue: {days_overdue}

Please arrange payment immediately. If you have already paid, please disregard this notice.

If you are having difficulties with payment, contact us to discuss alternative arrangements.

Best regards,
{company_name}";

const FINAL_SUBJECT: &str = "FINAL NOTICE - Invoice {invoice_number} - Immediate Action Required";
const FINAL_BODY: &str = "Dear {client_name},

This is a FINAL NOTICE regarding overdue invoice #{invoice_number} for {total_amount}, which is now {days_overdue} days past due.

Invoice Details:
- Invoice Number: {invoice_number}
- Amount: {total_amount}
- Due Date: {due_date}
- Days Overdue: {days_overdue}

If payment is not received by {final_deadline}, we may be forced to:
- Suspend services
- Forward this account to a collection agency
- Take legal action to recover the debt

Please contact us immediately if you need to discuss payment arrangements.

Best regards,
{company_name}";

/// Subject and body templates for a tier.
pub(super) fn for_tier(tier: ReminderTier) -> (&'static str, &'static str) {
    match tier {
        ReminderTier::Gentle => (GENTLE_SUBJECT, GENTLE_BODY),
        ReminderTier::Urgent => (URGENT_SUBJECT, URGENT_BODY),
        ReminderTier::Final => (FINAL_SUBJECT, FINAL_BODY),
    }
}

/// Replace `{name}` placeholders in a single left-to-right pass.
///
/// Unknown placeholders are kept verbatim, and substituted values are never
/// re-scanned, so a client name containing braces is printed as-is.
pub(super) fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let value = after.find('}').and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, end))
        });
        match value {
            Some((v, end)) => {
                out.push_str(v);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
