use chrono::{DateTime, Local};

use crate::{
    core::{
        builder::{DaySchedule, ScheduleParameters, build_day_schedule},
        directive::Directive,
        extrema::find_extrema,
        peaks::filter_peaks,
        slot::{PriceSlot, RawRate, chunk_by_day},
        tariff::Tariff,
    },
    prelude::*,
    quantity::Cost,
};

/// Upper bound on slots per call: two weeks of hours. Day-ahead feeds never come
/// close; anything above it is a malformed input.
pub const MAX_SLOTS: usize = 24 * 14;

/// The whole pipeline: normalize → chunk by day → detect extrema → filter peaks
/// → build the schedule. Pure with respect to its inputs: identical prices and
/// configuration always produce an identical plan.
#[derive(Copy, Clone, Debug)]
pub struct Scheduler {
    pub tariff: Tariff,

    /// Minimum sell-minus-buy spread that justifies one battery cycle.
    pub battery_cost: Cost,

    /// Hysteresis threshold of the extremum detector.
    pub delta: Cost,

    pub parameters: ScheduleParameters,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    pub today: Vec<DaySchedule>,
    pub tomorrow: Vec<DaySchedule>,
}

impl Scheduler {
    /// Schedule today and, when price data is already available, tomorrow.
    ///
    /// A failure while processing tomorrow's records degrades to an empty
    /// tomorrow with a warning: it must never prevent today's schedule.
    pub fn plan(&self, raw_today: &[RawRate], raw_tomorrow: &[RawRate]) -> Result<Plan> {
        let today = self.schedule_days(raw_today).context("failed to schedule today")?;
        let tomorrow = match self.schedule_days(raw_tomorrow) {
            Ok(days) => days,
            Err(error) => {
                warn!("failed to schedule tomorrow: {error:#}");
                Vec::new()
            }
        };
        Ok(Plan { today, tomorrow })
    }

    /// Normalize one day's records and build a schedule per calendar-day chunk.
    pub fn schedule_days(&self, raw: &[RawRate]) -> Result<Vec<DaySchedule>> {
        let slots = self.normalize(raw)?;
        Ok(chunk_by_day(&slots)
            .map(|chunk| {
                let (minima, maxima) = find_extrema(chunk, self.delta);
                debug!(n_minima = minima.len(), n_maxima = maxima.len(), "detected extrema");
                let valid = filter_peaks(&minima, &maxima, self.battery_cost, chunk);
                debug!(n_valid_peaks = valid.len(), "filtered peaks");
                build_day_schedule(chunk, &valid, &self.parameters)
            })
            .collect())
    }

    /// Derive priced slots from the raw records, validating each one.
    pub fn normalize(&self, raw: &[RawRate]) -> Result<Vec<PriceSlot>> {
        ensure!(
            raw.len() <= MAX_SLOTS,
            "too many price records: {} (at most {MAX_SLOTS})",
            raw.len(),
        );
        raw.iter().map(|record| PriceSlot::try_new(record, &self.tariff)).collect()
    }
}

impl Plan {
    pub fn days(&self) -> impl Iterator<Item = &DaySchedule> {
        self.today.iter().chain(&self.tomorrow)
    }

    /// Operating directive for the slot covering the given instant,
    /// `Standby` when no slot covers it.
    #[must_use]
    pub fn directive_at(&self, instant: DateTime<Local>) -> Directive {
        self.days()
            .flat_map(|day| &day.slots)
            .find(|slot| slot.interval.contains(instant))
            .map_or(Directive::Standby, |slot| slot.mode.into())
    }
}
