//! Core data structures.

mod forecast;
mod time_series;

pub use forecast::Forecast;
pub use time_series::{TimeSeries, WeekLabel};
