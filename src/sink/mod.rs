pub mod error;
pub mod pactl;
pub mod types;

pub use error::SinkError;
pub use pactl::PactlClient;
pub use types::{group_by_device, Sink, SinkControl, SinkGroup, SinkId, VolumePercent};
