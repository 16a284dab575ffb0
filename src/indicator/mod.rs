pub mod binder;
pub mod host;

pub use binder::{start, stop, Indicator, IndicatorState, RowBinding};
pub use host::{HostPanel, SubscriptionToken};
