use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{core::{mode::Mode, tariff::Tariff}, ops::Interval, prelude::*, quantity::Cost};

/// One raw day-ahead price record, as published by the price source.
#[derive(Copy, Clone, Debug, Deserialize)]
pub struct RawRate {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,

    /// Raw market price per kilowatt-hour, before any tariff.
    pub value: f64,
}

/// One priced time slot carrying both sides of the tariff.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PriceSlot {
    pub interval: Interval,
    pub buy: Cost,
    pub sell: Cost,
}

impl PriceSlot {
    pub fn try_new(raw: &RawRate, tariff: &Tariff) -> Result<Self> {
        ensure!(
            raw.start < raw.end,
            "price record must end after it starts: {:?}..{:?}",
            raw.start,
            raw.end,
        );
        Ok(Self {
            interval: Interval::new(raw.start, raw.end),
            buy: tariff.buy_price(raw.value),
            sell: tariff.sell_price(raw.value),
        })
    }

    pub const fn with_mode(self, mode: Mode) -> ScheduledSlot {
        ScheduledSlot { interval: self.interval, buy: self.buy, sell: self.sell, mode }
    }

    #[must_use]
    pub const fn start(&self) -> DateTime<Local> {
        self.interval.start
    }
}

/// A price slot with its operating mode assigned. Produced once per slot by the
/// schedule builder and never mutated afterwards.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ScheduledSlot {
    pub interval: Interval,
    pub buy: Cost,
    pub sell: Cost,
    pub mode: Mode,
}

impl ScheduledSlot {
    #[must_use]
    pub const fn start(&self) -> DateTime<Local> {
        self.interval.start
    }
}

/// Split a chronologically ordered slot list into runs sharing a calendar day.
///
/// Day boundaries come from the local calendar rather than a fixed slot count,
/// so 23 and 25-hour DST days and sub-hourly slots group correctly.
pub fn chunk_by_day(slots: &[PriceSlot]) -> impl Iterator<Item = &[PriceSlot]> {
    slots.chunk_by(|lhs, rhs| lhs.start().date_naive() == rhs.start().date_naive())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::core::testing::hourly_slots;

    #[test]
    fn test_rejects_inverted_interval() {
        let start = Local.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let raw = RawRate { start, end: start, value: 1.0 };
        let tariff = Tariff { vat_percent: 0.0, extra_import: Cost::ZERO, extra_export: Cost::ZERO };
        assert!(PriceSlot::try_new(&raw, &tariff).is_err());
    }

    #[test]
    fn test_missing_value_is_rejected() {
        let result: Result<RawRate, _> = serde_json::from_str(
            r#"{"start": "2025-01-01T00:00:00+01:00", "end": "2025-01-01T01:00:00+01:00"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_chunk_by_day() {
        let mut slots = hourly_slots(2025, 1, 1, &[1.0; 24]);
        slots.extend(hourly_slots(2025, 1, 2, &[1.0; 24]));

        let chunks: Vec<_> = chunk_by_day(&slots).collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 24);
        assert_eq!(chunks[1].len(), 24);
        assert_eq!(chunks[1][0].start().date_naive().to_string(), "2025-01-02");
    }
}
