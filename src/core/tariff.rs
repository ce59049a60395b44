use crate::quantity::Cost;

/// Consumer tariff on top of the raw day-ahead market price.
#[derive(Copy, Clone, Debug)]
pub struct Tariff {
    /// Value-added tax, in percent, applied to imported energy.
    pub vat_percent: f64,

    /// Fixed import surcharge per kilowatt-hour (grid fees, certificates).
    pub extra_import: Cost,

    /// Export compensation per kilowatt-hour.
    pub extra_export: Cost,
}

impl Tariff {
    /// What one kilowatt-hour actually costs to buy in the given slot.
    #[must_use]
    pub fn buy_price(&self, raw: f64) -> Cost {
        Cost::from(raw * (1.0 + self.vat_percent / 100.0) + self.extra_import.into_inner())
            .round_to_mills()
    }

    /// What one kilowatt-hour actually earns when sold in the given slot.
    #[must_use]
    pub fn sell_price(&self, raw: f64) -> Cost {
        Cost::from(raw + self.extra_export.into_inner()).round_to_mills()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const TARIFF: Tariff = Tariff {
        vat_percent: 25.0,
        extra_import: Cost(ordered_float::OrderedFloat(0.15)),
        extra_export: Cost(ordered_float::OrderedFloat(0.05)),
    };

    #[test]
    fn test_buy_price() {
        // 1.0 × 1.25 + 0.15:
        assert_abs_diff_eq!(TARIFF.buy_price(1.0).into_inner(), 1.4);
    }

    #[test]
    fn test_sell_price() {
        assert_abs_diff_eq!(TARIFF.sell_price(1.0).into_inner(), 1.05);
    }

    #[test]
    fn test_negative_raw_price() {
        assert_abs_diff_eq!(TARIFF.buy_price(-0.4).into_inner(), -0.35);
        assert_abs_diff_eq!(TARIFF.sell_price(-0.4).into_inner(), -0.35);
    }

    #[test]
    fn test_rounding() {
        assert_abs_diff_eq!(TARIFF.buy_price(0.0001).into_inner(), 0.15);
    }
}
