use std::collections::BTreeMap;

use chrono::{DateTime, Days, Local, NaiveTime, TimeDelta, TimeZone};
use itertools::Itertools;

use crate::{
    core::{
        extrema::{Extremum, ExtremumKind},
        mode::Mode,
        slot::{PriceSlot, ScheduledSlot},
    },
    prelude::*,
    quantity::Cost,
};

/// User-adjustable schedule knobs, passed explicitly into every computation.
#[derive(Copy, Clone, Debug)]
pub struct ScheduleParameters {
    /// Number of pricey hours reserved for self-consumption instead of grid sale.
    pub self_use_hours: usize,

    /// Total desired charge-window length in hours.
    pub charge_hours: usize,
}

/// Finalized schedule for one calendar day, ordered by slot start time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DaySchedule {
    pub slots: Vec<ScheduledSlot>,

    /// Highest sell price of the day.
    pub sell_max: Cost,

    /// The quota threshold: buy price of the `self_use_hours`-th priciest slot.
    pub selfuse_max: Cost,
}

/// Buy price of the `n`-th highest-priced slot, `n` starting at 1.
///
/// `n` beyond the slot count is clamped to the cheapest slot.
pub fn nth_highest_buy(slots: &[PriceSlot], n: usize) -> Cost {
    debug_assert!(n >= 1);
    slots
        .iter()
        .map(|slot| slot.buy)
        .sorted_unstable_by_key(|buy| std::cmp::Reverse(*buy))
        .nth(n.min(slots.len()).saturating_sub(1))
        .unwrap_or(Cost::ZERO)
}

fn next_midnight(after: DateTime<Local>) -> DateTime<Local> {
    let date = after.date_naive() + Days::new(1);
    Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .unwrap_or(after + TimeDelta::days(1))
}

/// Assign an operating mode to every slot of one calendar-day chunk.
///
/// Valid peaks bound the min→max windows. Within each window the earliest slot
/// charges, the priciest hours sell or self-use depending on which threshold is
/// higher, and everything else stands by. Slots already assigned keep their
/// first mode. Finally, uncovered slots are filled as Standby and charge windows
/// are widened to `charge_hours` by converting the cheapest eligible Standby
/// hours.
pub fn build_day_schedule(
    chunk: &[PriceSlot],
    valid_peaks: &[Extremum],
    parameters: &ScheduleParameters,
) -> DaySchedule {
    let Some(first) = chunk.first() else {
        return DaySchedule { slots: Vec::new(), sell_max: Cost::ZERO, selfuse_max: Cost::ZERO };
    };
    let midnight = next_midnight(first.start());

    let sell_max = chunk.iter().map(|slot| slot.sell).max().unwrap_or(Cost::ZERO);
    let mut selfuse_hours = parameters.self_use_hours.max(1);
    let mut selfuse_max = nth_highest_buy(chunk, selfuse_hours);

    let peaks: Vec<Extremum> =
        valid_peaks.iter().filter(|peak| peak.start < midnight).copied().sorted_by_key(|peak| peak.start).collect();

    // More detected cycles mean more trading opportunity: widen the self-use
    // quota and restrict the first window to the start of the third peak.
    let mut window_limit = if peaks.len() > 2 {
        selfuse_hours *= 2;
        selfuse_max = nth_highest_buy(chunk, selfuse_hours);
        peaks[2].start
    } else {
        midnight
    };
    debug!(%sell_max, %selfuse_max, selfuse_hours, n_peaks = peaks.len(), "building day schedule");

    let mut schedule: BTreeMap<DateTime<Local>, ScheduledSlot> = BTreeMap::new();
    let mut prev_min: Option<Extremum> = None;
    let mut expect_min = true;

    for peak in &peaks {
        let mut window: Vec<PriceSlot> = Vec::new();
        match peak.kind {
            ExtremumKind::Minimum if expect_min => {
                expect_min = false;
                prev_min = Some(*peak);
            }
            ExtremumKind::Maximum if !expect_min => {
                expect_min = true;
                if let Some(min) = prev_min {
                    window = chunk
                        .iter()
                        .filter(|slot| slot.start() >= min.start && slot.start() < window_limit)
                        .copied()
                        .collect();
                }
                // Only the first window is ever restricted by the third peak:
                window_limit = midnight;
            }
            _ => {}
        }

        if !window.is_empty() {
            assign_window(&mut schedule, window, sell_max, selfuse_max, selfuse_hours);
        }
    }

    // Total coverage: whatever no window touched stands by.
    for slot in chunk {
        schedule.entry(slot.start()).or_insert_with(|| slot.with_mode(Mode::Standby));
    }

    if parameters.charge_hours > 1 {
        extend_charge_windows(&mut schedule, parameters.charge_hours);
    }

    DaySchedule { slots: schedule.into_values().collect(), sell_max, selfuse_max }
}

/// Assign modes for one completed min→max window. First assignment wins: a slot
/// already present in the accumulator is never re-added.
fn assign_window(
    schedule: &mut BTreeMap<DateTime<Local>, ScheduledSlot>,
    mut window: Vec<PriceSlot>,
    sell_max: Cost,
    selfuse_max: Cost,
    selfuse_hours: usize,
) {
    // The earliest slot of the window is the trough: it charges.
    let charge = window.remove(0);
    schedule.entry(charge.start()).or_insert_with(|| charge.with_mode(Mode::Charge));

    // Stable sort keeps the chronological order among equally priced slots:
    window.sort_by(|lhs, rhs| rhs.buy.cmp(&lhs.buy));
    let mut rest = window.into_iter();

    if selfuse_max <= sell_max {
        // Selling beats self-use: the single priciest hour goes to the grid.
        if let Some(sell) = rest.next() {
            schedule.entry(sell.start()).or_insert_with(|| sell.with_mode(Mode::Sell));
        }
    } else {
        trace!(%selfuse_max, %sell_max, "self-use beats selling");
    }

    let mut selfuse_counter = 0;
    for slot in rest {
        let mode = if slot.buy > sell_max && selfuse_counter < selfuse_hours {
            selfuse_counter += 1;
            Mode::Selfuse
        } else {
            Mode::Standby
        };
        schedule.entry(slot.start()).or_insert_with(|| slot.with_mode(mode));
    }
}

/// Widen every charge window to `charge_hours` slots by converting the cheapest
/// Standby hours between the neighbouring use hours. Hours already labeled
/// Charge, Sell or Selfuse are never displaced.
fn extend_charge_windows(
    schedule: &mut BTreeMap<DateTime<Local>, ScheduledSlot>,
    charge_hours: usize,
) {
    let charge_starts: Vec<DateTime<Local>> = schedule
        .values()
        .filter(|slot| slot.mode == Mode::Charge)
        .map(ScheduledSlot::start)
        .collect();

    for charge_start in charge_starts {
        let prev_use = schedule
            .values()
            .filter(|slot| slot.mode.is_use_hour() && slot.start() < charge_start)
            .next_back()
            .map(ScheduledSlot::start);
        let next_use = schedule
            .values()
            .find(|slot| slot.mode.is_use_hour() && slot.start() > charge_start)
            .map(ScheduledSlot::start);
        if prev_use.is_none() && next_use.is_none() {
            // A day may charge without ever discharging; nothing bounds the
            // window then and widening it is pointless.
            continue;
        }

        let mut candidates: Vec<ScheduledSlot> = schedule
            .values()
            .filter(|slot| {
                slot.mode == Mode::Standby
                    && prev_use.is_none_or(|bound| slot.start() > bound)
                    && next_use.is_none_or(|bound| slot.start() < bound)
            })
            .copied()
            .collect();
        candidates.sort_unstable_by_key(|slot| (slot.buy, slot.start()));

        for slot in candidates.into_iter().take(charge_hours - 1) {
            trace!(start = %slot.start(), buy = %slot.buy, "extending charge window");
            schedule.insert(slot.start(), ScheduledSlot { mode: Mode::Charge, ..slot });
        }
    }
}
