use std::io;

use wordfreq_core::CountError;

/// A non-cancellation failure, surfaced through `EngineState::Error` and the
/// event reporter. Cancellation is deliberately absent: it resolves to the
/// `Cancelled` state and is never treated as an error.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The text source could not produce its content.
    #[error("text source failed: {0}")]
    Source(#[from] io::Error),
    /// Decoding or post-processing failed while counting words.
    #[error(transparent)]
    Count(#[from] CountError),
    /// A cached index references a word absent from the frequency map.
    /// Signals a cache-invalidation bug, not an environmental fault.
    #[error("index entry {word:?} has no frequency")]
    IndexOutOfSync { word: String },
    /// The pipeline task terminated abnormally.
    #[error("pipeline task failed: {0}")]
    Task(String),
}
