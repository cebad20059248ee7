//! Pure trigger evaluation of one rule against one snapshot.

use super::snapshot::PriceSnapshot;
use super::subscriber::{AlertRule, Direction};

/// Outcome of evaluating a rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerResult {
    /// The snapshot has no reading for the rule's commodity.
    NotApplicable,
    /// A reading exists but the condition does not hold.
    NotTriggered,
    /// The condition holds at this price.
    Triggered(f64),
}

impl TriggerResult {
    #[must_use]
    pub const fn is_triggered(self) -> bool {
        matches!(self, Self::Triggered(_))
    }
}

/// Decide whether `rule` currently holds.
///
/// Comparisons are strict: a price equal to the threshold never triggers.
#[must_use]
pub fn evaluate(snapshot: &PriceSnapshot, rule: &AlertRule) -> TriggerResult {
    let Some(current) = snapshot.get(rule.commodity) else {
        return TriggerResult::NotApplicable;
    };

    let triggered = match rule.direction {
        Direction::Above => current > rule.threshold,
        Direction::Below => current < rule.threshold,
    };

    if triggered {
        TriggerResult::Triggered(current)
    } else {
        TriggerResult::NotTriggered
    }
}
