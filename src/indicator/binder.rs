use std::sync::Arc;

use super::host::{HostPanel, SubscriptionToken};
use crate::config::IndicatorConfig;
use crate::sink::{group_by_device, SinkControl, SinkError, SinkId, VolumePercent};

/// One rendered slider row: which sink it writes to and the subscription
/// handle to release on teardown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowBinding {
    pub sink: SinkId,
    pub token: SubscriptionToken,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorState {
    Disabled,
    Enabled,
}

/// Panel indicator binding a one-shot sink snapshot to host-rendered sliders.
///
/// Lifecycle is `Disabled` -> `Enabled` (one listing, rows built) ->
/// `Disabled` (every subscription released, rows discarded). There is no
/// refresh state; the menu shows whatever the listing returned at enable
/// time.
pub struct Indicator<H: HostPanel> {
    host: H,
    control: Arc<dyn SinkControl>,
    title: String,
    translation_domain: String,
    icon_name: String,
    bindings: Vec<RowBinding>,
    state: IndicatorState,
}

impl<H: HostPanel> Indicator<H> {
    pub fn new(host: H, control: Arc<dyn SinkControl>, config: &IndicatorConfig) -> Self {
        Self {
            host,
            control,
            title: config.title.clone(),
            translation_domain: config.translation_domain.clone(),
            icon_name: config.icon_name.clone(),
            bindings: Vec::new(),
            state: IndicatorState::Disabled,
        }
    }

    pub fn state(&self) -> IndicatorState {
        self.state
    }

    /// Title the host should display, already resolved from configuration.
    /// The host is expected to translate it under [`Self::translation_domain`].
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn translation_domain(&self) -> &str {
        &self.translation_domain
    }

    /// Name of the status-area icon the host should render, e.g.
    /// `audio-speakers-symbolic`.
    pub fn icon_name(&self) -> &str {
        &self.icon_name
    }

    pub fn bindings(&self) -> &[RowBinding] {
        &self.bindings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Takes one sink snapshot and renders it: a separator per run of sinks
    /// sharing a device, then a slider row per sink.
    ///
    /// A listing failure leaves the indicator enabled with an empty menu and
    /// hands the error back so the caller can show it; it never panics the
    /// host.
    pub async fn enable(&mut self) -> Result<(), SinkError> {
        if self.state == IndicatorState::Enabled {
            return Ok(());
        }
        self.state = IndicatorState::Enabled;

        let sinks = match self.control.list_sinks().await {
            Ok(sinks) => sinks,
            Err(e) => {
                tracing::error!("Sink listing failed, menu stays empty: {}", e);
                return Err(e);
            }
        };

        for group in group_by_device(&sinks) {
            self.host.add_separator(&group.device);
            for sink in group.sinks {
                let token = self.host.add_slider(&sink.label, sink.volume);
                self.bindings.push(RowBinding { sink: sink.id, token });
            }
        }
        tracing::debug!("Indicator enabled with {} sink row(s)", self.bindings.len());
        Ok(())
    }

    /// Routes one slider drag to the bound sink's volume.
    ///
    /// Write failures are logged and swallowed; the slider keeps the dragged
    /// position even though the audio system may not have adopted it. Events
    /// for unknown tokens (already disconnected, or a stale host callback)
    /// are ignored.
    pub async fn on_slider_change(&self, token: SubscriptionToken, value: VolumePercent) {
        let Some(binding) = self.bindings.iter().find(|b| b.token == token) else {
            tracing::warn!("Slider event for unknown token {}", token);
            return;
        };
        if let Err(e) = self.control.set_volume(binding.sink, value).await {
            tracing::error!("Could not set volume: {}", e);
        }
    }

    /// Releases every slider subscription, then discards the host's rows.
    /// Tokens are disconnected before `clear` so no change event can fire
    /// against a discarded row. Safe to call when already disabled.
    pub fn disable(&mut self) {
        for binding in self.bindings.drain(..) {
            self.host.disconnect(binding.token);
        }
        self.host.clear();
        self.state = IndicatorState::Disabled;
    }
}

/// Host integration entry point: builds the indicator against the given
/// panel and enables it. A listing error is returned alongside the (empty
/// but usable) indicator rather than aborting.
pub async fn start<H: HostPanel>(
    host: H,
    control: Arc<dyn SinkControl>,
    config: &IndicatorConfig,
) -> (Indicator<H>, Option<SinkError>) {
    let mut indicator = Indicator::new(host, control, config);
    let error = indicator.enable().await.err();
    (indicator, error)
}

/// Host integration exit point: tears the indicator down and drops it.
pub fn stop<H: HostPanel>(mut indicator: Indicator<H>) {
    indicator.disable();
}
