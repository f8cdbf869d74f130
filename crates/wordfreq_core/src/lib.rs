//! Wordfreq core: tokenization, word counting, and index building.
mod config;
mod count;
mod decode;
mod index;
mod match_rule;
mod post;
mod tokenize;

pub use config::TokenizationConfig;
pub use count::{CountError, FrequencyMap, UnicodeWordCounter, WordCounter};
pub use decode::{decode_text, DecodeError};
pub use index::{IndexBuilder, IndexTable, SortKey, SortingIndexBuilder};
pub use match_rule::{MatchRule, APOSTROPHES};
pub use post::{endings_extractor, post_apostrophe_omitter, PostProcessError, PostProcessor};
pub use tokenize::{tokenize, WordSpans};
