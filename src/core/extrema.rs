use std::cmp::Reverse;

use chrono::{DateTime, Local};

use crate::{core::slot::PriceSlot, quantity::Cost};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ExtremumKind {
    Minimum,
    Maximum,
}

/// A confirmed turning point in the day's price series.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Extremum {
    pub start: DateTime<Local>,
    pub buy: Cost,
    pub sell: Cost,
    pub kind: ExtremumKind,
}

impl Extremum {
    pub const fn from_slot(slot: &PriceSlot, kind: ExtremumKind) -> Self {
        Self { start: slot.interval.start, buy: slot.buy, sell: slot.sell, kind }
    }
}

/// Find local minima and maxima of the buy price with a hysteresis (zig-zag) scan.
///
/// A running maximum is only confirmed once the price drops more than `delta`
/// below it, and vice versa, which suppresses noise smaller than `delta` and
/// yields alternating turning points. Known behaviors kept on purpose:
///
/// - A maximum coinciding with the very first slot is never registered.
/// - A trend still in progress at the end of the day is not confirmed
///   (no trailing flush), so a final-hour peak can go unreported.
/// - When no minimum confirms at all, the globally cheapest slot is registered
///   as a synthetic minimum so that every day has at least one usable trough.
pub fn find_extrema(slots: &[PriceSlot], delta: Cost) -> (Vec<Extremum>, Vec<Extremum>) {
    let Some(first) = slots.first() else {
        return (Vec::new(), Vec::new());
    };

    let mut minima = Vec::new();
    let mut maxima = Vec::new();
    let mut max_seen = *first;
    let mut min_seen = *first;
    let mut look_for_max = true;
    let mut at_start = true;

    for slot in slots {
        if slot.buy > max_seen.buy {
            max_seen = *slot;
        }
        if slot.buy < min_seen.buy {
            min_seen = *slot;
        }
        if look_for_max {
            if slot.buy < max_seen.buy - delta {
                if max_seen.start() != first.start() {
                    maxima.push(Extremum::from_slot(&max_seen, ExtremumKind::Maximum));
                }
                min_seen = *slot;
                look_for_max = false;
            } else if at_start {
                // An opening trough: keep seeking the maximum from here.
                max_seen = *slot;
                at_start = false;
            }
        } else if slot.buy > min_seen.buy + delta {
            minima.push(Extremum::from_slot(&min_seen, ExtremumKind::Minimum));
            max_seen = *slot;
            look_for_max = true;
        }
    }

    if minima.is_empty()
        && let Some(cheapest) = cheapest_slot(slots.iter())
    {
        minima.push(Extremum::from_slot(cheapest, ExtremumKind::Minimum));
    }

    (minima, maxima)
}

/// The lowest-priced slot, earliest first among equal prices.
pub fn cheapest_slot<'a>(slots: impl Iterator<Item = &'a PriceSlot>) -> Option<&'a PriceSlot> {
    slots.min_by_key(|slot| (slot.buy, slot.start()))
}

/// The highest-priced slot, earliest first among equal prices.
pub fn priciest_slot<'a>(slots: impl Iterator<Item = &'a PriceSlot>) -> Option<&'a PriceSlot> {
    slots.max_by_key(|slot| (slot.buy, Reverse(slot.start())))
}
