use std::fmt::{Display, Formatter};

use comfy_table::Color;
use serde::{Deserialize, Serialize};

/// Operating mode assigned to a single price slot.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub enum Mode {
    /// Buy from the grid into the battery.
    Charge,

    /// Discharge into the grid at the day's best rate.
    Sell,

    /// Cover the household load from the battery instead of the grid.
    Selfuse,

    /// Do not do anything.
    #[default]
    Standby,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Charge => write!(f, "Charge"),
            Self::Sell => write!(f, "Sell"),
            Self::Selfuse => write!(f, "Self-use"),
            Self::Standby => write!(f, "Standby"),
        }
    }
}

impl Mode {
    pub const fn color(self) -> Color {
        match self {
            Self::Charge => Color::Green,
            Self::Sell => Color::Blue,
            Self::Selfuse => Color::DarkYellow,
            Self::Standby => Color::Reset,
        }
    }

    /// A slot holding energy for later use, as opposed to charging or idling.
    #[must_use]
    pub const fn is_use_hour(self) -> bool {
        matches!(self, Self::Sell | Self::Selfuse)
    }
}
