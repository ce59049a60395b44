use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Deserialize;

use crate::{
    core::{builder::ScheduleParameters, planner::Scheduler, slot::RawRate, tariff::Tariff},
    quantity::Cost,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute and display the charge/discharge schedule for the given prices.
    #[clap(name = "plan")]
    Plan(Box<PlanArgs>),

    /// Development tool: show detected extrema and the accepted peak pairs.
    #[clap(name = "peaks")]
    Peaks(Box<PlanArgs>),
}

#[derive(Parser)]
pub struct PlanArgs {
    /// Day-ahead prices JSON: `{"raw_today": [{"start", "end", "value"}, …], "raw_tomorrow": […]}`.
    #[clap(long = "rates", env = "RATES_PATH")]
    pub rates_path: PathBuf,

    #[clap(flatten)]
    pub tariff: TariffArgs,

    #[clap(flatten)]
    pub schedule: ScheduleArgs,
}

#[derive(Copy, Clone, Parser)]
pub struct TariffArgs {
    /// Value-added tax on imported energy, in percent.
    #[clap(long = "vat-percent", default_value = "25", env = "VAT_PERCENT")]
    pub vat_percent: f64,

    /// Fixed import surcharge per kilowatt-hour.
    #[clap(long = "extra-import", default_value = "0", env = "EXTRA_IMPORT")]
    pub extra_import: Cost,

    /// Export compensation per kilowatt-hour.
    #[clap(long = "extra-export", default_value = "0", env = "EXTRA_EXPORT")]
    pub extra_export: Cost,

    /// Minimum sell-minus-buy spread that justifies one battery cycle.
    #[clap(long = "battery-cost", default_value = "0.5", env = "BATTERY_COST")]
    pub battery_cost: Cost,
}

#[derive(Copy, Clone, Parser)]
pub struct ScheduleArgs {
    /// Hysteresis threshold of the extremum detector, in price units.
    #[clap(long = "delta", default_value = "0.1", env = "DELTA")]
    pub delta: Cost,

    /// Number of pricey hours reserved for self-consumption instead of grid sale.
    #[clap(long = "selfuse-hours", default_value = "4", env = "SELFUSE_HOURS")]
    pub selfuse_hours: usize,

    /// Total desired charge-window length in hours.
    #[clap(long = "charge-hours", default_value = "1", env = "CHARGE_HOURS")]
    pub charge_hours: usize,
}

impl PlanArgs {
    pub fn scheduler(&self) -> Scheduler {
        Scheduler {
            tariff: Tariff {
                vat_percent: self.tariff.vat_percent,
                extra_import: self.tariff.extra_import,
                extra_export: self.tariff.extra_export,
            },
            battery_cost: self.tariff.battery_cost,
            delta: self.schedule.delta,
            parameters: ScheduleParameters {
                self_use_hours: self.schedule.selfuse_hours,
                charge_hours: self.schedule.charge_hours,
            },
        }
    }
}

/// The price sensor attribute layout: today's records plus tomorrow's, the
/// latter empty until the day-ahead auction publishes.
#[derive(Deserialize)]
pub struct RatesDocument {
    pub raw_today: Vec<RawRate>,

    #[serde(default)]
    pub raw_tomorrow: Vec<RawRate>,
}
