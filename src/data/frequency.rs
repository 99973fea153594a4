//! Word-frequency aggregation per label.
//!
//! Counting preserves the order in which each word first appears, so every
//! ranking derived from a [`FrequencyTable`] breaks ties by first occurrence.

use std::collections::HashMap;

use serde::Serialize;

use super::error::FrequencyError;
use super::filter::label_tokens;
use super::model::{Label, NewsDataset};

/// One `(word, count)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Token → count for one label, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<WordCount>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Count a token stream.
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        let mut table = Self::default();
        for token in tokens {
            table.add(token);
        }
        table
    }

    fn add(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&pos) => self.entries[pos].count += 1,
            None => {
                self.index.insert(token.to_string(), self.entries.len());
                self.entries.push(WordCount::new(token, 1));
            }
        }
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.index.get(word).map(|&pos| self.entries[pos].count)
    }

    /// Sum of all counts.
    pub fn total_tokens(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn max_count(&self) -> Option<usize> {
        self.entries.iter().map(|e| e.count).max()
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &WordCount> {
        self.entries.iter()
    }

    /// The `n` most frequent words, highest count first.
    ///
    /// Equal counts keep first-occurrence order. Fewer than `n` distinct
    /// words yields all of them.
    pub fn most_common(&self, n: usize) -> Result<Vec<WordCount>, FrequencyError> {
        if n == 0 {
            return Err(FrequencyError::InvalidArgument(
                "n must be a positive integer".to_string(),
            ));
        }
        let mut ranked = self.entries.clone();
        // stable: ties stay in first-occurrence order
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        Ok(ranked)
    }
}

/// Every distinct word of the records labelled `label`, with its count.
pub fn count_all(dataset: &NewsDataset, label: Label) -> FrequencyTable {
    FrequencyTable::from_tokens(label_tokens(dataset, label))
}

/// The `n` most frequent words of the records labelled `label`.
///
/// No matching records is not an error: the result is simply empty.
pub fn most_common(
    dataset: &NewsDataset,
    label: Label,
    n: usize,
) -> Result<Vec<WordCount>, FrequencyError> {
    count_all(dataset, label).most_common(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::records_with_label;
    use crate::data::model::NewsRecord;

    fn example() -> NewsDataset {
        NewsDataset::from_records(vec![
            NewsRecord::new("cat dog cat", Label::Fake),
            NewsRecord::new("dog bird", Label::Fake),
            NewsRecord::new("fish", Label::Real),
        ])
    }

    fn larger() -> NewsDataset {
        NewsDataset::from_records(vec![
            NewsRecord::new("trump says election rigged", Label::Fake),
            NewsRecord::new("senate passes budget bill", Label::Real),
            NewsRecord::new("election fraud claims election officials", Label::Fake),
            NewsRecord::new("  budget  talks resume  ", Label::Real),
            NewsRecord::new("shocking video says it all", Label::Fake),
            NewsRecord::new("Election election ELECTION", Label::Fake),
        ])
    }

    #[test]
    fn test_most_common_breaks_ties_by_first_occurrence() {
        let top = most_common(&example(), Label::Fake, 2).unwrap();
        assert_eq!(top, vec![WordCount::new("cat", 2), WordCount::new("dog", 2)]);
    }

    #[test]
    fn test_most_common_returns_all_when_fewer_than_n() {
        let top = most_common(&example(), Label::Real, 5).unwrap();
        assert_eq!(top, vec![WordCount::new("fish", 1)]);
    }

    #[test]
    fn test_most_common_rejects_zero() {
        let err = most_common(&example(), Label::Fake, 0).unwrap_err();
        assert!(matches!(err, FrequencyError::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_selection_is_empty_result() {
        let ds = NewsDataset::from_records(vec![NewsRecord::new("only fake", Label::Fake)]);
        assert!(most_common(&ds, Label::Real, 10).unwrap().is_empty());
        assert!(count_all(&ds, Label::Real).is_empty());
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        let table = count_all(&larger(), Label::Fake);
        assert_eq!(table.get("election"), Some(4));
        assert_eq!(table.get("Election"), Some(1));
        assert_eq!(table.get("ELECTION"), Some(1));
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let top = most_common(&larger(), Label::Fake, 4).unwrap();
        assert_eq!(
            top,
            vec![
                WordCount::new("election", 4),
                WordCount::new("says", 2),
                WordCount::new("trump", 1),
                WordCount::new("rigged", 1),
            ]
        );
    }

    #[test]
    fn test_length_never_exceeds_n() {
        let ds = larger();
        for label in Label::ALL {
            let distinct = count_all(&ds, label).len();
            for n in 1..=distinct + 3 {
                let top = most_common(&ds, label, n).unwrap();
                assert!(top.len() <= n);
                assert_eq!(top.len(), n.min(distinct));
            }
        }
    }

    #[test]
    fn test_short_vocabulary_is_fully_covered() {
        let ds = larger();
        let table = count_all(&ds, Label::Real);
        let top = most_common(&ds, Label::Real, table.len() + 1).unwrap();
        assert_eq!(top.len(), table.len());
        for entry in table.iter() {
            assert!(top.contains(entry));
        }
    }

    #[test]
    fn test_total_matches_token_count() {
        let ds = larger();
        for label in Label::ALL {
            let expected: usize = records_with_label(&ds, label)
                .map(|r| r.text.split_whitespace().count())
                .sum();
            assert_eq!(count_all(&ds, label).total_tokens(), expected);
        }
    }

    #[test]
    fn test_most_common_is_deterministic() {
        let ds = larger();
        let first = most_common(&ds, Label::Fake, 10).unwrap();
        for _ in 0..5 {
            assert_eq!(most_common(&ds, Label::Fake, 10).unwrap(), first);
        }
    }

    #[test]
    fn test_table_keeps_first_occurrence_order() {
        let table = count_all(&example(), Label::Fake);
        let words: Vec<_> = table.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["cat", "dog", "bird"]);
        assert_eq!(table.max_count(), Some(2));
    }

    #[test]
    fn test_table_serializes_as_ordered_list() {
        let table = count_all(&example(), Label::Real);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"word":"fish","count":1}]"#);
    }
}
