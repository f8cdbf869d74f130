use std::sync::Arc;

use crate::APOSTROPHES;

/// Error raised by a [`PostProcessor`] for a specific word. Aborts the
/// surrounding count.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("post-processing failed for {word:?}: {message}")]
pub struct PostProcessError {
    pub word: String,
    pub message: String,
}

impl PostProcessError {
    pub fn new(word: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            message: message.into(),
        }
    }
}

/// A pluggable rule applied to each word span after tokenization.
///
/// Returning `Ok(None)` keeps the span as is; `Ok(Some(words))` replaces it
/// with `words`, where an empty list drops the span entirely.
pub type PostProcessor =
    Arc<dyn Fn(&str) -> Result<Option<Vec<String>>, PostProcessError> + Send + Sync>;

/// Splits contractions like "it's" or "they're" into component words using a
/// fixed endings table. Endings that need the preceding word to resolve
/// ("isn't") are left untouched.
pub fn endings_extractor() -> PostProcessor {
    Arc::new(|word| {
        let parts: Vec<&str> = word.split(|c| APOSTROPHES.contains(&c)).collect();
        if parts.len() != 2 {
            return Ok(None);
        }
        let replacement = match parts[1] {
            "s" => "is",
            "re" => "are",
            "ve" => "have",
            "ll" => "will",
            "d" => "would",
            _ => return Ok(None),
        };
        Ok(Some(vec![parts[0].to_string(), replacement.to_string()]))
    })
}

/// Drops everything after an apostrophe, so "dog's" becomes "dog".
pub fn post_apostrophe_omitter() -> PostProcessor {
    Arc::new(|word| {
        let parts: Vec<&str> = word.split(|c| APOSTROPHES.contains(&c)).collect();
        if parts.len() != 2 || parts[0].is_empty() {
            return Ok(None);
        }
        Ok(Some(vec![parts[0].to_string()]))
    })
}
