use std::fmt::{Display, Formatter};

use crate::core::mode::Mode;

/// Operating directive for the downstream inverter, derived from the schedule
/// mode at a given instant.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Directive {
    #[default]
    Standby,
    Charging,
    Discharging,
    Selfuse,
}

impl From<Mode> for Directive {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Standby => Self::Standby,
            Mode::Charge => Self::Charging,
            Mode::Sell => Self::Discharging,
            Mode::Selfuse => Self::Selfuse,
        }
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standby => write!(f, "Standby"),
            Self::Charging => write!(f, "Charging"),
            Self::Discharging => write!(f, "Discharging"),
            Self::Selfuse => write!(f, "Selfuse"),
        }
    }
}
