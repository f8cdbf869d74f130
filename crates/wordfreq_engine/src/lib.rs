//! Wordfreq engine: single-flight analysis pipeline with cache coherence
//! and cooperative cancellation.
mod engine;
mod error;
mod observable;
mod pipeline;
mod report;
mod source;
mod types;

pub use engine::{EngineHandle, EngineSettings};
pub use error::EngineError;
pub use observable::Observable;
pub use report::{EventContext, EventReporter, LogReporter};
pub use source::TextSource;
pub use types::{EngineState, PendingRequest, RowItem};
