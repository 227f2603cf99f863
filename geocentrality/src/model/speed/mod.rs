mod fill_value_lookup;
mod highway_speeds;
pub mod speed_ops;
mod travel_time;

pub use fill_value_lookup::FillValueLookup;
pub use highway_speeds::HighwaySpeeds;
pub use travel_time::{assign_travel_times, SpeedSource, SpeedSourceCounts};
