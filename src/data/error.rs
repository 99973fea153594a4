use thiserror::Error;

// ---------------------------------------------------------------------------
// Loading errors
// ---------------------------------------------------------------------------

/// Failure to turn a source file into a [`NewsDataset`](super::model::NewsDataset).
///
/// Any of these halts rendering until another file is opened.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    /// Structurally invalid input. `row` is the 0-based data row when the
    /// problem is tied to one.
    #[error("malformed source{}: {reason}", at_row(.row))]
    Malformed { row: Option<usize>, reason: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

impl LoadError {
    pub(crate) fn malformed(row: Option<usize>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            row,
            reason: reason.into(),
        }
    }
}

fn at_row(row: &Option<usize>) -> String {
    row.map(|r| format!(" at row {r}")).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Aggregation errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrequencyError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_row() {
        let err = LoadError::malformed(Some(3), "'Label': expected a string");
        assert_eq!(
            err.to_string(),
            "malformed source at row 3: 'Label': expected a string"
        );

        let err = LoadError::malformed(None, "expected a top-level JSON array");
        assert_eq!(err.to_string(), "malformed source: expected a top-level JSON array");
    }
}
