use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::error::FrequencyError;
use crate::data::filter::label_distribution;
use crate::data::frequency::{count_all, FrequencyTable, WordCount};
use crate::data::model::{DatasetSummary, Label, LoadReport, NewsDataset};

// ---------------------------------------------------------------------------
// DashboardView – everything the presentation layer is allowed to see
// ---------------------------------------------------------------------------

/// Derived values for one label's section of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPanel {
    pub label: Label,
    /// Input of the bar chart and the top-N table.
    pub top_words: Vec<WordCount>,
    /// Input of the word cloud. Independent of N.
    pub frequencies: FrequencyTable,
}

/// Immutable bundle handed to the renderer. Rebuilt, never patched, except
/// that a new N only replaces the `top_words` lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub summary: DatasetSummary,
    pub load_report: LoadReport,
    pub distribution: Vec<(Label, usize)>,
    pub top_n: usize,
    pub panels: Vec<LabelPanel>,
}

impl DashboardView {
    pub fn build(dataset: &NewsDataset, n: usize) -> Result<Self, FrequencyError> {
        let panels = Label::ALL
            .iter()
            .map(|&label| {
                let frequencies = count_all(dataset, label);
                let top_words = frequencies.most_common(n)?;
                Ok(LabelPanel {
                    label,
                    top_words,
                    frequencies,
                })
            })
            .collect::<Result<Vec<_>, FrequencyError>>()?;

        Ok(Self {
            summary: dataset.summary(),
            load_report: *dataset.report(),
            distribution: label_distribution(dataset),
            top_n: n,
            panels,
        })
    }

    /// Same view with the top-N lists recomputed for a new `n`. The full
    /// frequency tables are reused as-is.
    pub fn with_top_n(&self, n: usize) -> Result<Self, FrequencyError> {
        let panels = self
            .panels
            .iter()
            .map(|panel| {
                Ok(LabelPanel {
                    label: panel.label,
                    top_words: panel.frequencies.most_common(n)?,
                    frequencies: panel.frequencies.clone(),
                })
            })
            .collect::<Result<Vec<_>, FrequencyError>>()?;

        Ok(Self {
            top_n: n,
            panels,
            ..self.clone()
        })
    }

    pub fn panel(&self, label: Label) -> Option<&LabelPanel> {
        self.panels.iter().find(|p| p.label == label)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing dashboard view")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::frequency::most_common;
    use crate::data::model::NewsRecord;

    fn dataset() -> NewsDataset {
        NewsDataset::from_records(vec![
            NewsRecord::new("cat dog cat", Label::Fake),
            NewsRecord::new("dog bird", Label::Fake),
            NewsRecord::new("fish", Label::Real),
        ])
    }

    #[test]
    fn test_build_matches_core_operations() {
        let ds = dataset();
        let view = DashboardView::build(&ds, 2).unwrap();

        assert_eq!(view.summary.total, 3);
        assert_eq!(view.distribution, vec![(Label::Fake, 2), (Label::Real, 1)]);
        for label in Label::ALL {
            let panel = view.panel(label).unwrap();
            assert_eq!(panel.top_words, most_common(&ds, label, 2).unwrap());
            assert_eq!(panel.frequencies, count_all(&ds, label));
        }
    }

    #[test]
    fn test_with_top_n_only_changes_top_words() {
        let ds = dataset();
        let view = DashboardView::build(&ds, 1).unwrap();
        let wider = view.with_top_n(3).unwrap();

        assert_eq!(wider.top_n, 3);
        assert_eq!(wider.summary, view.summary);
        assert_eq!(wider, DashboardView::build(&ds, 3).unwrap());
        assert_eq!(view.panel(Label::Fake).unwrap().top_words.len(), 1);
        assert_eq!(wider.panel(Label::Fake).unwrap().top_words.len(), 3);
    }

    #[test]
    fn test_zero_n_is_rejected() {
        assert!(DashboardView::build(&dataset(), 0).is_err());
        let view = DashboardView::build(&dataset(), 1).unwrap();
        assert!(view.with_top_n(0).is_err());
    }

    #[test]
    fn test_json_export_shape() {
        let view = DashboardView::build(&dataset(), 2).unwrap();
        let json: serde_json::Value = serde_json::from_str(&view.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["summary"]["fake"], 2);
        assert_eq!(json["distribution"][1][0], "Real");
        assert_eq!(json["panels"][0]["top_words"][0]["word"], "cat");
        assert_eq!(json["panels"][1]["frequencies"][0]["count"], 1);
    }
}
