use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use engine_logging::{engine_debug, engine_warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use wordfreq_core::{
    FrequencyMap, IndexBuilder, IndexTable, SortKey, SortingIndexBuilder, TokenizationConfig,
    UnicodeWordCounter, WordCounter,
};

use crate::pipeline::{self, PipelineFailure, PipelineInput, PipelineOutput};
use crate::{
    EngineError, EngineState, EventContext, EventReporter, Observable, PendingRequest, RowItem,
    TextSource,
};

/// Initial engine configuration.
pub struct EngineSettings {
    pub tokenization: TokenizationConfig,
    pub sort_key: SortKey,
    /// Name attached to reporter events for this engine instance.
    pub screen_name: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tokenization: TokenizationConfig::default(),
            sort_key: SortKey::MostFrequent,
            screen_name: "word_frequency".to_string(),
        }
    }
}

enum Command {
    Load,
    SetSortKey(SortKey),
    SetTextSource(Arc<dyn TextSource>),
    SetTokenization(TokenizationConfig),
}

/// Handle to one analysis engine instance.
///
/// Operations are posted to a dedicated control loop which owns the caches
/// and guarantees at most one computation in flight. Handles are cheap to
/// clone; instances are fully independent of each other. Dropping every
/// handle shuts the loop down once any in-flight work resolves.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: UnboundedSender<Command>,
    states: Observable<EngineState>,
    rows: Observable<Vec<RowItem>>,
}

impl EngineHandle {
    /// Creates an engine over `source` with the stock counter and index
    /// builder and no reporter.
    pub fn new(source: Arc<dyn TextSource>, settings: EngineSettings) -> Self {
        Self::with_services(
            source,
            Arc::new(UnicodeWordCounter),
            Arc::new(SortingIndexBuilder),
            None,
            settings,
        )
    }

    /// Creates an engine with every collaborator supplied by the caller.
    pub fn with_services(
        source: Arc<dyn TextSource>,
        counter: Arc<dyn WordCounter>,
        builder: Arc<dyn IndexBuilder>,
        reporter: Option<Arc<dyn EventReporter>>,
        settings: EngineSettings,
    ) -> Self {
        let states = Observable::new(EngineState::Initial);
        let rows = Observable::new(Vec::new());
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        let engine = Engine {
            source,
            counter,
            builder,
            reporter,
            tokenization: settings.tokenization,
            sort_key: settings.sort_key,
            screen_name: settings.screen_name,
            map_cache: None,
            index_cache: HashMap::new(),
            states: states.clone(),
            rows: rows.clone(),
        };
        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            runtime.block_on(engine.run(cmd_rx));
        });

        Self {
            cmd_tx,
            states,
            rows,
        }
    }

    /// Triggers the first computation. A no-op once one has run or is
    /// running, except after an error, where it retries from intact caches.
    pub fn request_load(&self) {
        let _ = self.cmd_tx.send(Command::Load);
    }

    /// Switches the ranking. A no-op if the key is unchanged; otherwise the
    /// cached index for that key is reused when still valid.
    pub fn set_sort_key(&self, key: SortKey) {
        let _ = self.cmd_tx.send(Command::SetSortKey(key));
    }

    /// Replaces the text source, invalidating every cached result.
    pub fn set_text_source(&self, source: Arc<dyn TextSource>) {
        let _ = self.cmd_tx.send(Command::SetTextSource(source));
    }

    /// Replaces the tokenization configuration, invalidating every cached
    /// result.
    pub fn set_tokenization(&self, config: TokenizationConfig) {
        let _ = self.cmd_tx.send(Command::SetTokenization(config));
    }

    /// Engine lifecycle state: last value plus stream of changes.
    pub fn states(&self) -> &Observable<EngineState> {
        &self.states
    }

    /// Displayable rows: last value plus stream of changes.
    pub fn rows(&self) -> &Observable<Vec<RowItem>> {
        &self.rows
    }
}

struct Engine {
    source: Arc<dyn TextSource>,
    counter: Arc<dyn WordCounter>,
    builder: Arc<dyn IndexBuilder>,
    reporter: Option<Arc<dyn EventReporter>>,
    tokenization: TokenizationConfig,
    sort_key: SortKey,
    screen_name: String,
    map_cache: Option<Arc<FrequencyMap>>,
    index_cache: HashMap<SortKey, Arc<IndexTable>>,
    states: Observable<EngineState>,
    rows: Observable<Vec<RowItem>>,
}

impl Engine {
    async fn run(mut self, mut cmd_rx: UnboundedReceiver<Command>) {
        while let Some(cmd) = cmd_rx.recv().await {
            let mut pending = self.admit(cmd);
            while pending != PendingRequest::None {
                if pending == PendingRequest::ClearCache {
                    self.clear_caches();
                }
                pending = self.run_once(&mut cmd_rx).await;
            }
        }
    }

    /// Applies a command to the current configuration and returns the
    /// strength of the recomputation it demands.
    fn admit(&mut self, cmd: Command) -> PendingRequest {
        match cmd {
            Command::Load => {
                self.report_screen();
                match self.states.get() {
                    EngineState::Initial | EngineState::Error { .. } => PendingRequest::ReuseCache,
                    _ => PendingRequest::None,
                }
            }
            Command::SetSortKey(key) => {
                if key == self.sort_key {
                    return PendingRequest::None;
                }
                self.report_sort_change(self.sort_key, key);
                self.sort_key = key;
                PendingRequest::ReuseCache
            }
            Command::SetTextSource(source) => {
                self.source = source;
                PendingRequest::ClearCache
            }
            Command::SetTokenization(config) => {
                self.tokenization = config;
                PendingRequest::ClearCache
            }
        }
    }

    /// Runs one computation, draining commands that arrive mid-flight.
    /// Returns the merged request queued behind it, if any.
    async fn run_once(&mut self, cmd_rx: &mut UnboundedReceiver<Command>) -> PendingRequest {
        self.publish_state(EngineState::UpdateStarted);

        let cancel = CancellationToken::new();
        let sort_key = self.sort_key;
        let input = PipelineInput {
            source: Arc::clone(&self.source),
            counter: Arc::clone(&self.counter),
            builder: Arc::clone(&self.builder),
            tokenization: self.tokenization.clone(),
            sort_key,
            cached_map: self.map_cache.clone(),
            cached_index: self.index_cache.get(&sort_key).cloned(),
        };
        let mut task = tokio::spawn(pipeline::run(input, self.states.clone(), cancel.clone()));

        let mut pending = PendingRequest::None;
        let mut channel_open = true;
        let outcome = loop {
            tokio::select! {
                joined = &mut task => break joined,
                cmd = cmd_rx.recv(), if channel_open => match cmd {
                    Some(cmd) => {
                        let merged = pending.merge(self.admit(cmd));
                        if merged == PendingRequest::ClearCache
                            && pending != PendingRequest::ClearCache
                        {
                            // Invalidating change: cancel cooperatively and
                            // keep waiting; the caches are not touched until
                            // the task has acknowledged the cancellation.
                            self.publish_state(EngineState::Cancelling);
                            cancel.cancel();
                        }
                        pending = merged;
                    }
                    // Every handle dropped; let the in-flight run finish.
                    None => channel_open = false,
                },
            }
        };

        match outcome {
            Err(join_error) => self.fail(EngineError::Task(join_error.to_string())),
            Ok(Err(PipelineFailure::Error(error))) => self.fail(error),
            // A run superseded by an invalidating request resolves to
            // `Cancelled` even if it crossed the finish line; its output is
            // stale and must never reach the caches.
            _ if pending == PendingRequest::ClearCache => {
                self.publish_state(EngineState::Cancelled);
            }
            Ok(Ok(output)) => {
                self.apply(sort_key, output);
                self.publish_state(EngineState::Finished);
            }
            Ok(Err(PipelineFailure::Cancelled)) => {
                self.publish_state(EngineState::Cancelled);
            }
        }

        pending
    }

    fn apply(&mut self, sort_key: SortKey, output: PipelineOutput) {
        self.map_cache = Some(Arc::clone(&output.map));
        self.index_cache.insert(sort_key, Arc::clone(&output.index));
        engine_debug!("{} row items published", output.rows.len());
        self.rows.publish(output.rows);
    }

    fn clear_caches(&mut self) {
        self.map_cache = None;
        self.index_cache.clear();
        self.rows.publish(Vec::new());
    }

    fn fail(&mut self, error: EngineError) {
        engine_warn!("computation failed: {error}");
        if let Some(reporter) = &self.reporter {
            reporter.error(&error);
        }
        self.publish_state(EngineState::Error {
            description: error.to_string(),
        });
    }

    fn publish_state(&self, state: EngineState) {
        engine_debug!("state changed to {state:?}");
        self.states.publish(state);
    }

    fn report_screen(&self) {
        if let Some(reporter) = &self.reporter {
            reporter.screen(&self.screen_name);
        }
    }

    fn report_sort_change(&self, from: SortKey, to: SortKey) {
        if let Some(reporter) = &self.reporter {
            let mut context = EventContext::new();
            context.insert("from".into(), format!("{from:?}").into());
            context.insert("to".into(), format!("{to:?}").into());
            context.insert("screen".into(), self.screen_name.clone().into());
            reporter.event("sort_key_changed", context);
        }
    }
}
