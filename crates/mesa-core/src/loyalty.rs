//! # Loyalty Rules
//!
//! Pure point math for the two earn paths: the flat bonus granted when a
//! reservation is created, and the bracketed earn applied at checkout.
//!
//! Both paths write through the ledger's atomic increment; this module
//! only computes deltas.

use serde::{Deserialize, Serialize};

/// Parameters of the loyalty program.
///
/// Defaults reproduce the production behavior: +10 points per
/// reservation, and 20 points per full 10 currency units spent at the
/// register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LoyaltyRules {
    /// Points granted when a reservation is created, and reversed when
    /// the customer cancels it while still pending.
    pub reservation_bonus: i64,

    /// Bracket width for checkout earn, in the smallest currency unit.
    pub earn_step: i64,

    /// Points granted per full bracket of checkout total.
    pub points_per_step: i64,
}

impl Default for LoyaltyRules {
    fn default() -> Self {
        LoyaltyRules {
            reservation_bonus: 10,
            earn_step: 10,
            points_per_step: 20,
        }
    }
}

impl LoyaltyRules {
    /// Points earned for a checkout total.
    ///
    /// Integer bracketing: `(total / earn_step) * points_per_step`.
    /// A total of 215 at the defaults earns `21 * 20 = 420`.
    pub fn points_for_total(&self, total: i64) -> i64 {
        if total <= 0 || self.earn_step <= 0 {
            return 0;
        }
        (total / self.earn_step) * self.points_per_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates() {
        let rules = LoyaltyRules::default();
        assert_eq!(rules.reservation_bonus, 10);
        assert_eq!(rules.earn_step, 10);
        assert_eq!(rules.points_per_step, 20);
    }

    #[test]
    fn test_points_for_total_brackets() {
        let rules = LoyaltyRules::default();
        assert_eq!(rules.points_for_total(215), 420);
        assert_eq!(rules.points_for_total(9), 0);
        assert_eq!(rules.points_for_total(10), 20);
        assert_eq!(rules.points_for_total(0), 0);
    }

    #[test]
    fn test_points_for_total_zero_step_earns_nothing() {
        let rules = LoyaltyRules {
            earn_step: 0,
            ..LoyaltyRules::default()
        };
        assert_eq!(rules.points_for_total(100), 0);
    }
}
