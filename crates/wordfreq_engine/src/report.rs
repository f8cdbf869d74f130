use engine_logging::{engine_error, engine_info};

use crate::EngineError;

/// Structured payload attached to lifecycle events.
pub type EventContext = serde_json::Map<String, serde_json::Value>;

/// Receives failures and lifecycle events from the engine.
///
/// Calls are fire-and-forget: the engine invokes them inline from its
/// control loop and never waits on a result, so implementations must not
/// block.
pub trait EventReporter: Send + Sync {
    fn error(&self, error: &EngineError);

    fn event(&self, name: &str, context: EventContext);

    fn screen(&self, name: &str) {
        let mut context = EventContext::new();
        context.insert("screen_name".into(), name.into());
        self.event("screen_shown", context);
    }
}

/// Reporter that forwards everything to the logging facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl EventReporter for LogReporter {
    fn error(&self, error: &EngineError) {
        engine_error!("engine error: {error}");
    }

    fn event(&self, name: &str, context: EventContext) {
        engine_info!("event {name}: {}", serde_json::Value::Object(context));
    }
}
