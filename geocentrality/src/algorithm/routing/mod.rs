mod draw_outcome;
mod route_generator;
mod route_record;
pub mod shortest_path;

pub use draw_outcome::{DrawOutcome, DrawStatistics, RejectReason};
pub use route_generator::{RouteGenerator, RouteState};
pub use route_record::RouteRecord;
pub use shortest_path::{shortest_path, ShortestPath};
