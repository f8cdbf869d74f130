use crate::FrequencyMap;

/// Ranking strategy for the word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Alphabetical,
    MostFrequent,
    ByLength,
}

/// Ordered sequence of distinct words, derived from one frequency map
/// snapshot and invalid the moment that snapshot changes.
pub type IndexTable = Vec<String>;

/// Builds an ordered word index for a sort key.
pub trait IndexBuilder: Send + Sync {
    fn build(&self, map: &FrequencyMap, key: SortKey) -> IndexTable;
}

/// Sort-based builder with deterministic tie-breaks.
///
/// `MostFrequent` orders by descending count, `ByLength` by ascending
/// code-point count; both break ties by ascending word order.
#[derive(Debug, Default, Clone, Copy)]
pub struct SortingIndexBuilder;

impl IndexBuilder for SortingIndexBuilder {
    fn build(&self, map: &FrequencyMap, key: SortKey) -> IndexTable {
        let mut words: Vec<&String> = map.keys().collect();
        match key {
            SortKey::Alphabetical => words.sort_unstable(),
            SortKey::MostFrequent => {
                words.sort_unstable_by(|a, b| map[*b].cmp(&map[*a]).then_with(|| a.cmp(b)));
            }
            SortKey::ByLength => {
                words.sort_unstable_by(|a, b| {
                    a.chars()
                        .count()
                        .cmp(&b.chars().count())
                        .then_with(|| a.cmp(b))
                });
            }
        }
        words.into_iter().cloned().collect()
    }
}
