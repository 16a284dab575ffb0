use crate::sink::types::SinkId;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("sink list unavailable: {0}")]
    ListUnavailable(String),
    #[error("volume set failed for sink {id}: {detail}")]
    SetFailed { id: SinkId, detail: String },
}
