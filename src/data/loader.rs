use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{Label, LoadReport, NewsDataset, NewsRecord};
use crate::config::ColumnConfig;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a news dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; text and label columns located by name
/// * `.json`    – `[{ "preprocessed_text": "...", "Label": "Fake" }, ...]`
/// * `.parquet` – Utf8 / LargeUtf8 text and label columns
///
/// Rows with a missing text or label cell, or a label other than `Fake` /
/// `Real`, are dropped and tallied in the dataset's [`LoadReport`].
pub fn load_file(path: &Path, columns: &ColumnConfig) -> Result<NewsDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path, columns),
        "json" => load_json(path, columns),
        "parquet" | "pq" => load_parquet(path, columns),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }?;

    let report = dataset.report();
    if report.unknown_label > 0 {
        log::warn!(
            "{}: dropped {} rows with a label other than Fake/Real",
            path.display(),
            report.unknown_label
        );
    }
    log::info!(
        "Loaded {} records from {} ({} rows read, {} dropped)",
        dataset.len(),
        path.display(),
        report.rows_read,
        report.dropped()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row filter shared by all formats
// ---------------------------------------------------------------------------

/// Accumulates rows and applies the drop rules.
#[derive(Default)]
struct RecordCollector {
    records: Vec<NewsRecord>,
    report: LoadReport,
}

impl RecordCollector {
    /// `None` (or an empty string) means the cell is missing.
    fn push(&mut self, text: Option<&str>, label: Option<&str>) {
        self.report.rows_read += 1;

        let text = text.filter(|t| !t.is_empty());
        let label = label.filter(|l| !l.is_empty());

        let Some(text) = text else {
            self.report.missing_text += 1;
            return;
        };
        let Some(label) = label else {
            self.report.missing_label += 1;
            return;
        };
        match label.parse::<Label>() {
            Ok(label) => self.records.push(NewsRecord::new(text, label)),
            Err(_) => self.report.unknown_label += 1,
        }
    }

    fn finish(self) -> NewsDataset {
        NewsDataset::with_report(self.records, self.report)
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Cell contents read as missing values, mirroring the usual dataframe CSV
/// defaults so files exported from notebooks load the same way.
const CSV_NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn csv_cell(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && !CSV_NA_VALUES.contains(v))
}

fn load_csv(path: &Path, columns: &ColumnConfig) -> Result<NewsDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let text_idx = column_position(&headers, &columns.text)?;
    let label_idx = column_position(&headers, &columns.label)?;

    let mut collector = RecordCollector::default();
    for result in reader.records() {
        let record = result?;
        collector.push(
            csv_cell(record.get(text_idx)),
            csv_cell(record.get(label_idx)),
        );
    }

    Ok(collector.finish())
}

fn column_position(headers: &csv::StringRecord, name: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LoadError::MissingColumn {
            column: name.to_string(),
        })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "preprocessed_text": "senate vote delayed", "Label": "Real" },
///   ...
/// ]
/// ```
///
/// A missing key or `null` is a missing cell. A column absent from every
/// object is a missing column.
fn load_json(path: &Path, columns: &ColumnConfig) -> Result<NewsDataset, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::malformed(None, "expected a top-level JSON array"))?;

    let mut objects = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| LoadError::malformed(Some(i), "not a JSON object"))?;
        objects.push(obj);
    }

    for column in [&columns.text, &columns.label] {
        if !objects.iter().any(|obj| obj.contains_key(column.as_str())) {
            return Err(LoadError::MissingColumn {
                column: column.clone(),
            });
        }
    }

    let mut collector = RecordCollector::default();
    for (i, obj) in objects.iter().enumerate() {
        let text = json_string(obj.get(&columns.text), i, &columns.text)?;
        let label = json_string(obj.get(&columns.label), i, &columns.label)?;
        collector.push(text, label);
    }

    Ok(collector.finish())
}

fn json_string<'a>(
    value: Option<&'a JsonValue>,
    row: usize,
    column: &str,
) -> Result<Option<&'a str>, LoadError> {
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(LoadError::malformed(
            Some(row),
            format!("'{column}': expected a string, got {other}"),
        )),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with string text / label columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path, columns: &ColumnConfig) -> Result<NewsDataset, LoadError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let schema = builder.schema().clone();
    let text_idx = schema_index(&schema, &columns.text)?;
    let label_idx = schema_index(&schema, &columns.label)?;

    let reader = builder.build()?;
    let mut collector = RecordCollector::default();

    for batch_result in reader {
        let batch = batch_result?;
        let text_col = batch.column(text_idx);
        let label_col = batch.column(label_idx);

        for row in 0..batch.num_rows() {
            let text = string_cell(text_col, row, &columns.text)?;
            let label = string_cell(label_col, row, &columns.label)?;
            collector.push(text, label);
        }
    }

    Ok(collector.finish())
}

fn schema_index(schema: &arrow::datatypes::Schema, name: &str) -> Result<usize, LoadError> {
    schema.index_of(name).map_err(|_| LoadError::MissingColumn {
        column: name.to_string(),
    })
}

/// Extract a string cell from a Utf8 or LargeUtf8 Arrow column.
fn string_cell<'a>(
    col: &'a Arc<dyn Array>,
    row: usize,
    column: &str,
) -> Result<Option<&'a str>, LoadError> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string_opt::<i32>().map(|s| s.value(row)),
        DataType::LargeUtf8 => col.as_string_opt::<i64>().map(|s| s.value(row)),
        _ => None,
    };
    match value {
        Some(v) => Ok(Some(v)),
        None => Err(LoadError::malformed(
            None,
            format!(
                "column '{column}' has type {:?}, expected a string column",
                col.data_type()
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int32Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_with(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn columns() -> ColumnConfig {
        ColumnConfig::default()
    }

    #[test]
    fn test_csv_basic() {
        let file = temp_with(
            ".csv",
            "title,preprocessed_text,Label\n\
             a,cat dog cat,Fake\n\
             b,dog bird,Fake\n\
             c,fish,Real\n",
        );
        let ds = load_file(file.path(), &columns()).unwrap();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[0], NewsRecord::new("cat dog cat", Label::Fake));
        assert_eq!(ds.records()[2].label, Label::Real);
        assert_eq!(ds.report().dropped(), 0);
    }

    #[test]
    fn test_csv_row_missing_label_is_dropped() {
        let file = temp_with(
            ".csv",
            "preprocessed_text,Label\n\
             one two,Fake\n\
             three,\n\
             four,Real\n\
             five,NaN\n",
        );
        let ds = load_file(file.path(), &columns()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.report().rows_read, 4);
        assert_eq!(ds.report().missing_label, 2);
    }

    #[test]
    fn test_csv_row_missing_text_is_dropped() {
        let file = temp_with(
            ".csv",
            "preprocessed_text,Label\n\
             ,Fake\n\
             kept,Real\n",
        );
        let ds = load_file(file.path(), &columns()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.report().missing_text, 1);
    }

    #[test]
    fn test_csv_unknown_label_is_dropped() {
        let file = temp_with(
            ".csv",
            "preprocessed_text,Label\n\
             a,Fake\n\
             b,Satire\n\
             c,real\n",
        );
        let ds = load_file(file.path(), &columns()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.report().unknown_label, 2);
    }

    #[test]
    fn test_csv_missing_column() {
        let file = temp_with(".csv", "preprocessed_text,category\nhello,Fake\n");
        let err = load_file(file.path(), &columns()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { ref column } if column == "Label"));
    }

    #[test]
    fn test_csv_custom_columns() {
        let file = temp_with(".csv", "body,class\nhello world,Real\n");
        let cols = ColumnConfig {
            text: "body".to_string(),
            label: "class".to_string(),
        };
        let ds = load_file(file.path(), &cols).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load_file(Path::new("/definitely/not/here.csv"), &columns()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = temp_with(".xlsx", "");
        let err = load_file(file.path(), &columns()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ref e) if e == "xlsx"));
    }

    #[test]
    fn test_json_records() {
        let file = temp_with(
            ".json",
            r#"[
                {"preprocessed_text": "cat dog", "Label": "Fake"},
                {"preprocessed_text": "fish", "Label": null},
                {"preprocessed_text": "bird"},
                {"preprocessed_text": "eel", "Label": "Real"}
            ]"#,
        );
        let ds = load_file(file.path(), &columns()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.report().missing_label, 2);
    }

    #[test]
    fn test_json_errors() {
        let file = temp_with(".json", r#"{"preprocessed_text": "x"}"#);
        assert!(matches!(
            load_file(file.path(), &columns()).unwrap_err(),
            LoadError::Malformed { row: None, .. }
        ));

        let file = temp_with(".json", r#"[{"preprocessed_text": "x"}]"#);
        assert!(matches!(
            load_file(file.path(), &columns()).unwrap_err(),
            LoadError::MissingColumn { .. }
        ));

        let file = temp_with(
            ".json",
            r#"[{"preprocessed_text": "x", "Label": "Fake"}, {"preprocessed_text": 3, "Label": "Fake"}]"#,
        );
        assert!(matches!(
            load_file(file.path(), &columns()).unwrap_err(),
            LoadError::Malformed { row: Some(1), .. }
        ));

        let file = temp_with(".json", "[{");
        assert!(matches!(
            load_file(file.path(), &columns()).unwrap_err(),
            LoadError::Json(_)
        ));
    }

    fn write_parquet(texts: Vec<Option<&str>>, labels: Vec<Option<&str>>) -> NamedTempFile {
        let temp_file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();

        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int32, false),
            Field::new("preprocessed_text", DataType::Utf8, true),
            Field::new("Label", DataType::Utf8, true),
        ]));
        let ids: Vec<i32> = (0..texts.len() as i32).collect();
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int32Array::from(ids)),
                Arc::new(StringArray::from(texts)),
                Arc::new(StringArray::from(labels)),
            ],
        )
        .unwrap();

        let file = temp_file.reopen().unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        temp_file
    }

    #[test]
    fn test_parquet_basic_with_nulls() {
        let file = write_parquet(
            vec![Some("cat dog"), None, Some("fish"), Some("eel")],
            vec![Some("Fake"), Some("Real"), None, Some("Real")],
        );
        let ds = load_file(file.path(), &columns()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1], NewsRecord::new("eel", Label::Real));
        assert_eq!(ds.report().missing_text, 1);
        assert_eq!(ds.report().missing_label, 1);
    }

    #[test]
    fn test_parquet_missing_column() {
        let file = write_parquet(vec![Some("a")], vec![Some("Fake")]);
        let cols = ColumnConfig {
            text: "body".to_string(),
            ..ColumnConfig::default()
        };
        let err = load_file(file.path(), &cols).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { ref column } if column == "body"));
    }

    #[test]
    fn test_parquet_non_string_column_is_malformed() {
        let file = write_parquet(vec![Some("a")], vec![Some("Fake")]);
        let cols = ColumnConfig {
            text: "id".to_string(),
            ..ColumnConfig::default()
        };
        let err = load_file(file.path(), &cols).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { row: None, .. }));
    }
}
