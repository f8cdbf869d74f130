/// Characters recognized as apostrophes inside compound words.
pub const APOSTROPHES: [char; 3] = ['\'', '\u{2019}', '`'];

/// Tokenization policy: decides which characters belong to a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchRule {
    /// Maximal runs of letters and digits, any script. Punctuation and emoji
    /// always act as separators.
    Alphanumeric,
    /// Maximal runs of letters, hyphens and apostrophes, so compounds like
    /// "mother-in-law" and contractions like "it's" survive as single spans.
    #[default]
    AlphabeticWithDashesAndApostrophes,
}

impl MatchRule {
    pub(crate) fn is_member(self, c: char) -> bool {
        match self {
            MatchRule::Alphanumeric => c.is_alphanumeric(),
            MatchRule::AlphabeticWithDashesAndApostrophes => {
                c.is_alphabetic() || c == '-' || APOSTROPHES.contains(&c)
            }
        }
    }
}
