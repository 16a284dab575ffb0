use crate::sink::VolumePercent;

/// Handle for one slider's value-change subscription. Issued by the host when
/// a slider row is created, released exactly once during teardown.
pub type SubscriptionToken = u64;

/// The surface a hosting panel toolkit must provide for the indicator to
/// render into. The indicator never touches widgets directly; it asks the
/// host for separators and slider rows and gets back subscription tokens it
/// can later release. The host delivers slider drags back through
/// [`crate::indicator::Indicator::on_slider_change`] with the same token.
pub trait HostPanel {
    /// Adds a heading separating one device's sinks from the next.
    fn add_separator(&mut self, label: &str);

    /// Adds a row with a slider preset to `initial` and subscribes to its
    /// value changes.
    fn add_slider(&mut self, label: &str, initial: VolumePercent) -> SubscriptionToken;

    /// Releases a slider subscription so no further change events fire for it.
    fn disconnect(&mut self, token: SubscriptionToken);

    /// Discards every row and separator. Only called after all tokens have
    /// been disconnected.
    fn clear(&mut self);
}
