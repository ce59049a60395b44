//! Shared fixtures for the scheduling tests.

use chrono::{Local, TimeDelta, TimeZone};

use crate::{core::slot::PriceSlot, ops::Interval, quantity::Cost};

/// Hourly slots starting at local midnight, one per value, with `buy == sell == value`.
pub fn hourly_slots(year: i32, month: u32, day: u32, values: &[f64]) -> Vec<PriceSlot> {
    let midnight = Local.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(hour, value)| {
            let start = midnight + TimeDelta::hours(hour.try_into().unwrap());
            PriceSlot {
                interval: Interval::new(start, start + TimeDelta::hours(1)),
                buy: Cost::from(*value),
                sell: Cost::from(*value),
            }
        })
        .collect()
}
