mod interval;

pub use self::interval::Interval;
