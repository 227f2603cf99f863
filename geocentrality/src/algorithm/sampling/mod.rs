mod polygon_sampler;
mod retry_policy;
mod sampled_point;

pub use polygon_sampler::{PointSample, PolygonSampler};
pub use retry_policy::RetryPolicy;
pub use sampled_point::SampledPoint;
