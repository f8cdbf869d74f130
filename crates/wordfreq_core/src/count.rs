use std::collections::HashMap;

use crate::{decode_text, tokenize, DecodeError, PostProcessError, TokenizationConfig};

/// Lowercased word to occurrence count.
pub type FrequencyMap = HashMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CountError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    PostProcess(#[from] PostProcessError),
}

/// Counts word frequencies in a text.
pub trait WordCounter: Send + Sync {
    fn count(&self, text: &str, config: &TokenizationConfig) -> Result<FrequencyMap, CountError>;

    /// Boundary helper for raw byte input: decode first, then count.
    fn count_bytes(
        &self,
        bytes: &[u8],
        encoding_label: Option<&str>,
        config: &TokenizationConfig,
    ) -> Result<FrequencyMap, CountError> {
        let text = decode_text(bytes, encoding_label)?;
        self.count(&text, config)
    }
}

/// Unicode-aware counter driven by [`tokenize`]; one pass over the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeWordCounter;

impl WordCounter for UnicodeWordCounter {
    fn count(&self, text: &str, config: &TokenizationConfig) -> Result<FrequencyMap, CountError> {
        let mut map = FrequencyMap::new();
        for span in tokenize(text, config.rule) {
            let replaced = match &config.post_processor {
                Some(process) => process(span)?,
                None => None,
            };
            match replaced {
                Some(words) => {
                    for word in words {
                        *map.entry(word.to_lowercase()).or_insert(0) += 1;
                    }
                }
                None => *map.entry(span.to_lowercase()).or_insert(0) += 1,
            }
        }
        Ok(map)
    }
}
