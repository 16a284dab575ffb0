use super::error::SinkError;
use serde::{Deserialize, Serialize};

/// Numeric handle pactl assigns to a sink. Only valid for the lifetime of the
/// audio session; a sink listed earlier may be gone by the time it is written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SinkId(pub u32);

impl std::fmt::Display for SinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SinkId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VolumePercent(u8);

impl VolumePercent {
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Clamps arbitrary integers into [0,100].
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for VolumePercent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sink {
    pub id: SinkId,
    /// Physical device the sink belongs to (`device.product.name`).
    pub device: String,
    /// Display name for the row (`device.profile.description`).
    pub label: String,
    pub volume: VolumePercent,
}

impl Sink {
    pub fn new(id: SinkId, device: String, label: String, volume: VolumePercent) -> Self {
        Self { id, device, label, volume }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SinkGroup {
    pub device: String,
    pub sinks: Vec<Sink>,
}

/// Groups sinks under one heading per run of equal `device` labels.
///
/// The grouping is positional: a new group starts exactly when the label
/// differs from the immediately preceding sink, so an unsorted listing may
/// yield more than one group for the same device. That mirrors how pactl
/// orders its output rather than computing a partition.
pub fn group_by_device(sinks: &[Sink]) -> Vec<SinkGroup> {
    let mut groups: Vec<SinkGroup> = Vec::new();
    for sink in sinks {
        match groups.last_mut() {
            Some(group) if group.device == sink.device => group.sinks.push(sink.clone()),
            _ => groups.push(SinkGroup {
                device: sink.device.clone(),
                sinks: vec![sink.clone()],
            }),
        }
    }
    groups
}

use async_trait::async_trait;

#[async_trait]
pub trait SinkControl: Send + Sync + std::fmt::Debug {
    /// One-shot snapshot of the current sinks, in the order the audio system
    /// reports them. No subscription; callers re-list if they want fresh data.
    async fn list_sinks(&self) -> Result<Vec<Sink>, SinkError>;

    /// Sets the volume of one sink. The percentage is forwarded verbatim.
    async fn set_volume(&self, id: SinkId, volume: VolumePercent) -> Result<(), SinkError>;
}
