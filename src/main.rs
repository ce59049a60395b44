#![doc = include_str!("../README.md")]

mod cli;
mod core;
mod ops;
mod prelude;
mod quantity;
mod tables;

use std::fs;

use chrono::Local;
use clap::{Parser, crate_version};
use itertools::Itertools;

use crate::{
    cli::{Args, Command, PlanArgs, RatesDocument},
    core::{extrema::find_extrema, peaks::filter_peaks, slot::chunk_by_day},
    prelude::*,
    tables::{build_extrema_table, build_schedule_table},
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Plan(args) => plan(&args),
        Command::Peaks(args) => peaks(&args),
    }
}

fn read_rates(args: &PlanArgs) -> Result<RatesDocument> {
    let raw = fs::read_to_string(&args.rates_path)
        .with_context(|| format!("failed to read {:?}", args.rates_path))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse the rates from {:?}", args.rates_path))
}

fn plan(args: &PlanArgs) -> Result {
    let rates = read_rates(args)?;
    info!(n_today = rates.raw_today.len(), n_tomorrow = rates.raw_tomorrow.len(), "read rates");

    let scheduler = args.scheduler();
    let plan = scheduler.plan(&rates.raw_today, &rates.raw_tomorrow)?;

    for day in plan.days() {
        info!(%day.sell_max, %day.selfuse_max, n_slots = day.slots.len(), "scheduled");
        println!("{}", build_schedule_table(day));
    }

    let now = Local::now();
    info!(directive = %plan.directive_at(now), "current");
    Ok(())
}

fn peaks(args: &PlanArgs) -> Result {
    let rates = read_rates(args)?;
    let scheduler = args.scheduler();

    let slots = {
        let mut slots = scheduler.normalize(&rates.raw_today)?;
        slots.extend(scheduler.normalize(&rates.raw_tomorrow)?);
        slots
    };
    for chunk in chunk_by_day(&slots) {
        let (minima, maxima) = find_extrema(chunk, scheduler.delta);
        let detected =
            minima.iter().chain(&maxima).copied().sorted_by_key(|peak| peak.start).collect_vec();
        info!(n_minima = minima.len(), n_maxima = maxima.len(), "detected");
        println!("{}", build_extrema_table(&detected));

        let valid = filter_peaks(&minima, &maxima, scheduler.battery_cost, chunk);
        info!(n_valid = valid.len(), "accepted");
        println!("{}", build_extrema_table(&valid));
    }
    Ok(())
}
