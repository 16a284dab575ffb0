use std::collections::HashMap;
use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio::process::Command;

use super::error::SinkError;
use super::types::{Sink, SinkControl, SinkId, VolumePercent};

const PRODUCT_NAME: &str = "device.product.name";
const PROFILE_DESCRIPTION: &str = "device.profile.description";

/// Sink control backed by the `pactl` command-line utility.
///
/// Listing shells out to `pactl --format=json list sinks`, writes go through
/// `pactl set-sink-volume <id> <percent>%`. Every invocation runs under a
/// timeout so a wedged audio server surfaces as an error instead of a hang.
#[derive(Debug, Clone)]
pub struct PactlClient {
    binary: String,
    timeout: Duration,
}

impl PactlClient {
    pub fn new(binary: String, timeout_ms: u64) -> Self {
        Self {
            binary,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn default_config() -> Self {
        Self::new("pactl".to_string(), 3000)
    }

    async fn run(&self, args: &[&str]) -> Result<Output, String> {
        tracing::debug!("Running: {} {}", self.binary, args.join(" "));
        let output = Command::new(&self.binary).args(args).output();
        match tokio::time::timeout(self.timeout, output).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(format!("failed to spawn {}: {}", self.binary, e)),
            Err(_) => Err(format!(
                "{} did not exit within {}ms",
                self.binary,
                self.timeout.as_millis()
            )),
        }
    }
}

impl Default for PactlClient {
    fn default() -> Self {
        Self::default_config()
    }
}

#[async_trait]
impl SinkControl for PactlClient {
    async fn list_sinks(&self) -> Result<Vec<Sink>, SinkError> {
        let output = self
            .run(&["--format=json", "list", "sinks"])
            .await
            .map_err(SinkError::ListUnavailable)?;

        if !output.status.success() {
            return Err(SinkError::ListUnavailable(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let text = std::str::from_utf8(&output.stdout)
            .map_err(|e| SinkError::ListUnavailable(format!("non-UTF-8 listing: {}", e)))?;
        parse_sink_listing(text)
    }

    async fn set_volume(&self, id: SinkId, volume: VolumePercent) -> Result<(), SinkError> {
        let id_arg = id.to_string();
        let volume_arg = volume.to_string();
        let output = self
            .run(&["set-sink-volume", &id_arg, &volume_arg])
            .await
            .map_err(|detail| SinkError::SetFailed { id, detail })?;

        if !output.status.success() {
            return Err(SinkError::SetFailed {
                id,
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawSink {
    index: u32,
    #[serde(default)]
    properties: HashMap<String, Value>,
    #[serde(default)]
    volume: HashMap<String, RawChannel>,
}

#[derive(Debug, Deserialize)]
struct RawChannel {
    value_percent: Value,
}

/// Decodes the JSON emitted by `pactl --format=json list sinks`.
pub(crate) fn parse_sink_listing(text: &str) -> Result<Vec<Sink>, SinkError> {
    let raw: Vec<RawSink> = serde_json::from_str(text)
        .map_err(|e| SinkError::ListUnavailable(format!("malformed listing: {}", e)))?;
    raw.into_iter().map(sink_from_raw).collect()
}

fn sink_from_raw(raw: RawSink) -> Result<Sink, SinkError> {
    let device = string_property(&raw, PRODUCT_NAME)?;
    let label = string_property(&raw, PROFILE_DESCRIPTION)?;

    // pactl reports one entry per channel; front-left stands in for the sink.
    let channel = raw.volume.get("front-left").ok_or_else(|| {
        SinkError::ListUnavailable(format!("sink {}: no front-left volume channel", raw.index))
    })?;
    let volume = parse_percent(&channel.value_percent).ok_or_else(|| {
        SinkError::ListUnavailable(format!(
            "sink {}: unreadable value_percent {}",
            raw.index, channel.value_percent
        ))
    })?;

    Ok(Sink::new(SinkId(raw.index), device, label, volume))
}

fn string_property(raw: &RawSink, key: &str) -> Result<String, SinkError> {
    raw.properties
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            SinkError::ListUnavailable(format!("sink {}: missing property {}", raw.index, key))
        })
}

/// `value_percent` arrives as a string like `"57%"` in practice, but a bare
/// number is accepted too. Fractional values truncate toward zero.
fn parse_percent(value: &Value) -> Option<VolumePercent> {
    match value {
        Value::Number(n) => n.as_f64().map(|f| VolumePercent::clamped(f as i64)),
        Value::String(s) => {
            let digits = s.trim().trim_end_matches('%').trim();
            digits
                .parse::<i64>()
                .ok()
                .or_else(|| digits.parse::<f64>().ok().map(|f| f as i64))
                .map(VolumePercent::clamped)
        }
        _ => None,
    }
}
