use super::model::{Label, NewsDataset, NewsRecord};

// ---------------------------------------------------------------------------
// Label selection
// ---------------------------------------------------------------------------

/// Records carrying `label`, in dataset order.
pub fn records_with_label(
    dataset: &NewsDataset,
    label: Label,
) -> impl Iterator<Item = &NewsRecord> + '_ {
    dataset.records().iter().filter(move |r| r.label == label)
}

/// Flat token stream of every record carrying `label`.
///
/// Equivalent to joining the texts with a single space and splitting the
/// result on whitespace.
pub fn label_tokens(dataset: &NewsDataset, label: Label) -> impl Iterator<Item = &str> + '_ {
    records_with_label(dataset, label).flat_map(|r| r.tokens())
}

/// `(label, record count)` for every label, in [`Label::ALL`] order.
pub fn label_distribution(dataset: &NewsDataset) -> Vec<(Label, usize)> {
    let summary = dataset.summary();
    Label::ALL
        .iter()
        .map(|&label| (label, summary.count(label)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> NewsDataset {
        NewsDataset::from_records(vec![
            NewsRecord::new("cat dog cat", Label::Fake),
            NewsRecord::new("fish", Label::Real),
            NewsRecord::new("dog bird", Label::Fake),
        ])
    }

    #[test]
    fn test_selection_keeps_dataset_order() {
        let ds = dataset();
        let texts: Vec<_> = records_with_label(&ds, Label::Fake)
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(texts, vec!["cat dog cat", "dog bird"]);
    }

    #[test]
    fn test_tokens_match_join_then_split() {
        let ds = dataset();
        let joined = records_with_label(&ds, Label::Fake)
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let expected: Vec<_> = joined.split_whitespace().collect();
        let actual: Vec<_> = label_tokens(&ds, Label::Fake).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_distribution() {
        let ds = dataset();
        assert_eq!(
            label_distribution(&ds),
            vec![(Label::Fake, 2), (Label::Real, 1)]
        );
        assert_eq!(
            label_distribution(&NewsDataset::default()),
            vec![(Label::Fake, 0), (Label::Real, 0)]
        );
    }
}
