use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// edge attribute minimized by shortest path searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Weight {
    /// segment length in meters (shortest routes)
    Length,
    /// segment travel time in seconds (fastest routes)
    TravelTime,
}

impl Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Weight::Length => write!(f, "length"),
            Weight::TravelTime => write!(f, "travel_time"),
        }
    }
}

impl TryFrom<&str> for Weight {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().trim() {
            "length" => Ok(Weight::Length),
            "travel_time" => Ok(Weight::TravelTime),
            _ => Err(format!(
                "invalid weight '{value}', use 'length' or 'travel_time'"
            )),
        }
    }
}
