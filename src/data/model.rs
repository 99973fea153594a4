use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Label – the classification tag of a record
// ---------------------------------------------------------------------------

/// Classification tag carried by every record in the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Label {
    Fake,
    Real,
}

impl Label {
    /// Every label, in display order.
    pub const ALL: [Label; 2] = [Label::Fake, Label::Real];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Fake => "Fake",
            Label::Real => "Real",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label cell holds something other than `Fake` / `Real`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown label '{}'", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

impl FromStr for Label {
    type Err = UnknownLabel;

    /// Case-sensitive: `"fake"` is not a label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fake" => Ok(Label::Fake),
            "Real" => Ok(Label::Real),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// NewsRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single news item: preprocessed, whitespace-tokenizable text plus its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRecord {
    pub text: String,
    pub label: Label,
}

impl NewsRecord {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    /// Whitespace-delimited tokens of this record, in order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }
}

// ---------------------------------------------------------------------------
// LoadReport – what happened to the rows while loading
// ---------------------------------------------------------------------------

/// Row accounting gathered by the loader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Data rows seen in the source (header excluded).
    pub rows_read: usize,
    /// Rows dropped because the text cell was null or empty.
    pub missing_text: usize,
    /// Rows dropped because the label cell was null or empty.
    pub missing_label: usize,
    /// Rows dropped because the label was neither `Fake` nor `Real`.
    pub unknown_label: usize,
}

impl LoadReport {
    pub fn dropped(&self) -> usize {
        self.missing_text + self.missing_label + self.unknown_label
    }
}

// ---------------------------------------------------------------------------
// DatasetSummary – headline counts for the overview section
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub total: usize,
    pub fake: usize,
    pub real: usize,
}

impl DatasetSummary {
    pub fn count(&self, label: Label) -> usize {
        match label {
            Label::Fake => self.fake,
            Label::Real => self.real,
        }
    }
}

// ---------------------------------------------------------------------------
// NewsDataset – the cleaned, immutable working set
// ---------------------------------------------------------------------------

/// The full cleaned dataset. Never mutated after the loader returns it.
#[derive(Debug, Clone, Default)]
pub struct NewsDataset {
    records: Vec<NewsRecord>,
    report: LoadReport,
}

impl NewsDataset {
    /// Build a dataset from already-validated records.
    pub fn from_records(records: Vec<NewsRecord>) -> Self {
        let report = LoadReport {
            rows_read: records.len(),
            ..LoadReport::default()
        };
        Self { records, report }
    }

    pub(crate) fn with_report(records: Vec<NewsRecord>, report: LoadReport) -> Self {
        Self { records, report }
    }

    pub fn records(&self) -> &[NewsRecord] {
        &self.records
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Number of records in the working set.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> DatasetSummary {
        let fake = self
            .records
            .iter()
            .filter(|r| r.label == Label::Fake)
            .count();
        DatasetSummary {
            total: self.records.len(),
            fake,
            real: self.records.len() - fake,
        }
    }
}
