pub mod config;
pub mod indicator;
pub mod sink;

pub use config::{Config, IndicatorConfig, PactlConfig};
pub use indicator::{start, stop, HostPanel, Indicator, IndicatorState, RowBinding, SubscriptionToken};
pub use sink::{group_by_device, PactlClient, Sink, SinkControl, SinkError, SinkGroup, SinkId, VolumePercent};
