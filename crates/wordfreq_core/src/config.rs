use std::fmt;

use crate::{MatchRule, PostProcessor};

/// How words are parsed: the match rule plus an optional post-processor.
///
/// The processor is opaque; callers treat any configuration replacement as
/// significant and rebuild everything derived from it.
#[derive(Clone, Default)]
pub struct TokenizationConfig {
    pub rule: MatchRule,
    pub post_processor: Option<PostProcessor>,
}

impl TokenizationConfig {
    pub fn new(rule: MatchRule) -> Self {
        Self {
            rule,
            post_processor: None,
        }
    }

    pub fn with_post_processor(rule: MatchRule, post_processor: PostProcessor) -> Self {
        Self {
            rule,
            post_processor: Some(post_processor),
        }
    }
}

impl fmt::Debug for TokenizationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenizationConfig")
            .field("rule", &self.rule)
            .field("post_processor", &self.post_processor.is_some())
            .finish()
    }
}
