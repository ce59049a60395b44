pub mod builder;
pub mod directive;
pub mod extrema;
pub mod mode;
pub mod peaks;
pub mod planner;
pub mod slot;
pub mod tariff;

#[cfg(test)]
pub mod testing;
