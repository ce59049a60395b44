use itertools::Itertools;

use crate::{
    core::{
        extrema::{Extremum, ExtremumKind, cheapest_slot, priciest_slot},
        slot::PriceSlot,
    },
    prelude::*,
    quantity::Cost,
};

/// Keep only min/max pairs whose sell-minus-buy spread covers one battery cycle.
///
/// The output is a flat list of alternating minimum/maximum entries, ordered by
/// time. A maximum that shows up without a registered minimum before it gets the
/// cheapest earlier slot substituted as its trough. When nothing passes at all,
/// one last attempt pairs the day's highest-priced slot with the cheapest slot
/// strictly before it; failing that, the day yields no valid peaks, which is an
/// economically correct outcome rather than an error.
pub fn filter_peaks(
    minima: &[Extremum],
    maxima: &[Extremum],
    battery_cost: Cost,
    slots: &[PriceSlot],
) -> Vec<Extremum> {
    let mut valid = Vec::new();
    let mut prev_min: Option<Extremum> = None;
    let mut expect_min = true;

    let peaks = minima.iter().chain(maxima).sorted_by_key(|peak| peak.start);
    for peak in peaks {
        match peak.kind {
            ExtremumKind::Minimum if expect_min => {
                expect_min = false;
                prev_min = Some(*peak);
            }
            ExtremumKind::Maximum if !expect_min => {
                if let Some(min) = prev_min
                    && peak.sell > min.buy + battery_cost
                {
                    valid.push(min);
                    valid.push(*peak);
                }
                expect_min = true;
            }
            ExtremumKind::Maximum => {
                // A peak without a trough before it: substitute the cheapest
                // earlier slot, if any, under the same spread test.
                if let Some(min) = cheapest_slot(slots.iter().filter(|s| s.start() < peak.start))
                    && peak.sell > min.buy + battery_cost
                {
                    valid.push(Extremum::from_slot(min, ExtremumKind::Minimum));
                    valid.push(*peak);
                }
            }
            ExtremumKind::Minimum => {}
        }
    }

    if valid.is_empty() {
        debug!("no alternating pair cleared the battery cost, trying the global pair");
        if let Some(max) = priciest_slot(slots.iter())
            && let Some(min) = cheapest_slot(slots.iter().filter(|s| s.start() < max.start()))
            && max.sell > min.buy + battery_cost
        {
            valid.push(Extremum::from_slot(min, ExtremumKind::Minimum));
            valid.push(Extremum::from_slot(max, ExtremumKind::Maximum));
        }
    }

    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{extrema::find_extrema, testing::hourly_slots};

    const DELTA: Cost = Cost(ordered_float::OrderedFloat(0.1));

    fn pairs(values: &[f64], battery_cost: f64) -> Vec<Extremum> {
        let slots = hourly_slots(2025, 1, 1, values);
        let (minima, maxima) = find_extrema(&slots, DELTA);
        filter_peaks(&minima, &maxima, Cost::from(battery_cost), &slots)
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_peaks(&[], &[], Cost::from(0.1), &[]).is_empty());
    }

    #[test]
    fn test_accepts_profitable_pair() {
        let mut values = [1.0; 24];
        values[2] = 0.5;
        values[18] = 3.0;

        let valid = pairs(&values, 0.1);
        assert_eq!(valid.len(), 2);
        assert_eq!(valid[0].kind, ExtremumKind::Minimum);
        assert_eq!(valid[0].buy, Cost::from(0.5));
        assert_eq!(valid[1].kind, ExtremumKind::Maximum);
        assert_eq!(valid[1].buy, Cost::from(3.0));
    }

    #[test]
    fn test_spread_test_is_strict() {
        // sell == buy + battery_cost exactly: rejected, and the global fallback
        // fails the same test.
        let mut values = [1.0; 24];
        values[2] = 0.5;
        values[18] = 3.0;

        assert!(pairs(&values, 2.5).is_empty());
    }

    #[test]
    fn test_economic_guard() {
        let mut values = [1.0; 24];
        values[2] = 0.3;
        values[6] = 2.0;
        values[10] = 0.4;
        values[14] = 2.5;

        let battery_cost = Cost::from(0.1);
        let valid = pairs(&values, 0.1);
        assert_eq!(valid.len(), 4);
        for pair in valid.chunks_exact(2) {
            assert!(pair[1].sell > pair[0].buy + battery_cost);
        }
    }

    #[test]
    fn test_unpaired_maximum_substitutes_cheapest_earlier_slot() {
        // Prices jump right after hour 0, so the maximum at hour 1 confirms
        // before any minimum does. The cheapest slot before it (hour 0) is
        // substituted as its trough.
        let valid = pairs(&[0.5, 2.0, 2.0, 2.0, 0.6, 2.0, 1.0, 1.0], 0.1);

        assert!(valid.len() >= 2);
        assert_eq!(valid[0].kind, ExtremumKind::Minimum);
        assert_eq!(valid[0].buy, Cost::from(0.5));
        assert_eq!(valid[1].kind, ExtremumKind::Maximum);
    }

    #[test]
    fn test_global_fallback_recovers_trailing_peak() {
        // No maximum confirms (no trailing flush), so the global pair kicks in.
        let valid = pairs(&[1.0, 0.5, 1.0, 2.0], 0.1);

        assert_eq!(valid.len(), 2);
        assert_eq!(valid[0].buy, Cost::from(0.5));
        assert_eq!(valid[1].buy, Cost::from(2.0));
    }

    #[test]
    fn test_negative_battery_cost_is_accepted() {
        // Degenerate but valid: nearly every cycle passes.
        let mut values = [1.0; 24];
        values[2] = 0.5;
        values[18] = 3.0;

        assert_eq!(pairs(&values, -1.0).len(), 2);
    }

    #[test]
    fn test_flat_prices_yield_nothing() {
        assert!(pairs(&[1.0; 24], 0.1).is_empty());
    }
}
