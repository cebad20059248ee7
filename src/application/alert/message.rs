//! Alert message text.

use crate::domain::Alert;

/// Render the text delivered for `alert`.
///
/// The text is valid Telegram HTML; it carries no user-supplied strings so
/// nothing needs escaping.
#[must_use]
pub fn format_alert_message(alert: &Alert) -> String {
    format!(
        "🚨 <b>Fuel Alert</b> 🚨\n\
         Fuel: {}\n\
         Condition: {} RM {}\n\
         Current Price: RM {:.2}",
        alert.rule.commodity.label(),
        alert.rule.direction,
        alert.rule.threshold,
        alert.price,
    )
}
