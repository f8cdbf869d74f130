use crate::MatchRule;

/// Splits `text` into word spans according to `rule`.
///
/// The returned iterator is lazy, borrows `text`, and makes a single pass
/// over it; re-invoking with the same arguments yields the same spans.
pub fn tokenize(text: &str, rule: MatchRule) -> WordSpans<'_> {
    WordSpans { text, rule, pos: 0 }
}

/// Iterator over word spans, created by [`tokenize`].
#[derive(Debug, Clone)]
pub struct WordSpans<'a> {
    text: &'a str,
    rule: MatchRule,
    pos: usize,
}

impl<'a> Iterator for WordSpans<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while self.pos < self.text.len() {
            let rest = &self.text[self.pos..];
            let Some((start, _)) = rest.char_indices().find(|&(_, c)| self.rule.is_member(c))
            else {
                self.pos = self.text.len();
                return None;
            };
            let run = &rest[start..];
            let end = run
                .char_indices()
                .find(|&(_, c)| !self.rule.is_member(c))
                .map_or(run.len(), |(i, _)| i);

            let span_start = self.pos + start;
            let span_end = span_start + end;
            self.pos = span_end;

            let span = &self.text[span_start..span_end];
            if self.accepts(span_start, span_end, span) {
                return Some(span);
            }
        }
        None
    }
}

impl WordSpans<'_> {
    // A compound span must hold at least one letter and must not touch a
    // word character (digit or underscore) on either side, so "abc123"
    // yields no compound spans.
    fn accepts(&self, start: usize, end: usize, span: &str) -> bool {
        match self.rule {
            MatchRule::Alphanumeric => true,
            MatchRule::AlphabeticWithDashesAndApostrophes => {
                span.chars().any(char::is_alphabetic)
                    && !self.text[..start]
                        .chars()
                        .next_back()
                        .is_some_and(is_word_char)
                    && !self.text[end..].chars().next().is_some_and(is_word_char)
            }
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
