mod cost;

pub use self::cost::Cost;
