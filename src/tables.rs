use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{
    builder::DaySchedule,
    extrema::{Extremum, ExtremumKind},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_schedule_table(day: &DaySchedule) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Start", "End", "Buy", "Sell", "Mode"]);
    for slot in &day.slots {
        table.add_row(vec![
            Cell::new(slot.interval.start.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(slot.interval.start.format("%H:%M")),
            Cell::new(slot.interval.end.format("%H:%M")).add_attribute(Attribute::Dim),
            Cell::new(slot.buy).set_alignment(CellAlignment::Right).fg(
                if slot.buy >= day.selfuse_max { Color::Red } else { Color::Reset },
            ),
            Cell::new(slot.sell).set_alignment(CellAlignment::Right).fg(
                if slot.sell >= day.sell_max { Color::Green } else { Color::Reset },
            ),
            Cell::new(slot.mode).fg(slot.mode.color()),
        ]);
    }
    table
}

pub fn build_extrema_table(extrema: &[Extremum]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Start", "Kind", "Buy", "Sell"]);
    for extremum in extrema {
        let (label, color) = match extremum.kind {
            ExtremumKind::Minimum => ("min", Color::Green),
            ExtremumKind::Maximum => ("max", Color::Red),
        };
        table.add_row(vec![
            Cell::new(extremum.start.format("%b %d %H:%M")),
            Cell::new(label).fg(color),
            Cell::new(extremum.buy).set_alignment(CellAlignment::Right),
            Cell::new(extremum.sell).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
