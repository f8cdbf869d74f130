use std::sync::Arc;

use engine_logging::engine_debug;
use tokio_util::sync::CancellationToken;
use wordfreq_core::{
    FrequencyMap, IndexBuilder, IndexTable, SortKey, TokenizationConfig, WordCounter,
};

use crate::{EngineError, EngineState, Observable, RowItem, TextSource};

/// Everything one computation needs, captured when it starts. Mid-flight
/// configuration changes never reach a running pipeline.
pub(crate) struct PipelineInput {
    pub source: Arc<dyn TextSource>,
    pub counter: Arc<dyn WordCounter>,
    pub builder: Arc<dyn IndexBuilder>,
    pub tokenization: TokenizationConfig,
    pub sort_key: SortKey,
    pub cached_map: Option<Arc<FrequencyMap>>,
    pub cached_index: Option<Arc<IndexTable>>,
}

pub(crate) struct PipelineOutput {
    pub map: Arc<FrequencyMap>,
    pub index: Arc<IndexTable>,
    pub rows: Vec<RowItem>,
}

pub(crate) enum PipelineFailure {
    Cancelled,
    Error(EngineError),
}

/// Runs count -> index -> rows for one request.
///
/// Cancellation is checked at stage boundaries only, never mid-stage. The
/// pipeline returns its results instead of writing the caches; the control
/// loop applies them, so a superseded run can never publish anything.
pub(crate) async fn run(
    input: PipelineInput,
    states: Observable<EngineState>,
    cancel: CancellationToken,
) -> Result<PipelineOutput, PipelineFailure> {
    let map = match input.cached_map {
        Some(map) => map,
        None => {
            publish(&states, EngineState::CountingWords);
            let text = input
                .source
                .text()
                .await
                .map_err(|err| PipelineFailure::Error(EngineError::Source(err)))?;
            let counted = input
                .counter
                .count(&text, &input.tokenization)
                .map_err(|err| PipelineFailure::Error(EngineError::Count(err)))?;
            Arc::new(counted)
        }
    };
    if cancel.is_cancelled() {
        return Err(PipelineFailure::Cancelled);
    }

    let index = match input.cached_index {
        Some(index) => index,
        None => {
            publish(&states, EngineState::BuildingIndex);
            Arc::new(input.builder.build(&map, input.sort_key))
        }
    };
    if cancel.is_cancelled() {
        return Err(PipelineFailure::Cancelled);
    }

    publish(&states, EngineState::UpdatingRows);
    let rows = build_rows(&map, &index)?;
    if cancel.is_cancelled() {
        return Err(PipelineFailure::Cancelled);
    }

    Ok(PipelineOutput { map, index, rows })
}

fn build_rows(map: &FrequencyMap, index: &[String]) -> Result<Vec<RowItem>, PipelineFailure> {
    index
        .iter()
        .map(|word| match map.get(word) {
            Some(&frequency) => Ok(RowItem {
                word: word.clone(),
                frequency,
            }),
            None => {
                // A stale index paired with a rebuilt map means the
                // invalidation invariant was violated.
                debug_assert!(false, "index entry {word:?} missing from frequency map");
                Err(PipelineFailure::Error(EngineError::IndexOutOfSync {
                    word: word.clone(),
                }))
            }
        })
        .collect()
}

fn publish(states: &Observable<EngineState>, state: EngineState) {
    engine_debug!("state changed to {state:?}");
    states.publish(state);
}
