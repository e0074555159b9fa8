use crate::schema::RecurrencePeriod;

impl RecurrencePeriod {
    /// Multiplier that turns one occurrence into its monthly equivalent.
    pub fn monthly_factor(self) -> f64 {
        match self {
            RecurrencePeriod::Weekly => 4.0,
            RecurrencePeriod::Biweekly => 2.0,
            RecurrencePeriod::Monthly => 1.0,
            RecurrencePeriod::OneTime => 1.0 / 12.0,
            RecurrencePeriod::Unrecognized => 1.0,
        }
    }
}

/// Converts an amount paid on `period` into its monthly equivalent.
///
/// One-time amounts are spread across a year. Unrecognized periods pass
/// through unchanged. A finite amount always yields a finite result: products
/// past `f64::MAX` saturate instead of overflowing.
pub fn monthly_equivalent(amount: f64, period: RecurrencePeriod) -> f64 {
    let monthly = match period {
        RecurrencePeriod::OneTime => amount / 12.0,
        other => amount * other.monthly_factor(),
    };

    if amount.is_finite() {
        monthly.clamp(-f64::MAX, f64::MAX)
    } else {
        monthly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_equivalent_per_period() {
        assert_eq!(monthly_equivalent(100.0, RecurrencePeriod::Weekly), 400.0);
        assert_eq!(monthly_equivalent(100.0, RecurrencePeriod::Biweekly), 200.0);
        assert_eq!(monthly_equivalent(100.0, RecurrencePeriod::Monthly), 100.0);
        assert_eq!(monthly_equivalent(1200.0, RecurrencePeriod::OneTime), 100.0);
        assert_eq!(
            monthly_equivalent(100.0, RecurrencePeriod::Unrecognized),
            100.0
        );
    }

    #[test]
    fn test_weekly_matches_four_times_monthly() {
        for x in [0.0, 0.01, 1.0, 37.5, 999.99, 1_000_000.0] {
            assert_eq!(
                monthly_equivalent(x, RecurrencePeriod::Weekly),
                monthly_equivalent(4.0 * x, RecurrencePeriod::Monthly)
            );
        }
    }

    #[test]
    fn test_zero_and_large_inputs_stay_finite() {
        let periods = [
            RecurrencePeriod::Weekly,
            RecurrencePeriod::Biweekly,
            RecurrencePeriod::Monthly,
            RecurrencePeriod::OneTime,
            RecurrencePeriod::Unrecognized,
        ];

        for period in periods {
            assert_eq!(monthly_equivalent(0.0, period), 0.0);
            assert!(monthly_equivalent(1e300, period).is_finite());
        }
    }

    #[test]
    fn test_amounts_near_f64_max_saturate() {
        let huge = f64::MAX / 1.5;

        assert_eq!(monthly_equivalent(huge, RecurrencePeriod::Weekly), f64::MAX);
        assert_eq!(monthly_equivalent(huge, RecurrencePeriod::Biweekly), f64::MAX);
        assert_eq!(monthly_equivalent(f64::MAX, RecurrencePeriod::Weekly), f64::MAX);
        assert_eq!(monthly_equivalent(huge, RecurrencePeriod::Monthly), huge);
        assert_eq!(
            monthly_equivalent(f64::INFINITY, RecurrencePeriod::Weekly),
            f64::INFINITY
        );
    }
}
