//! Labeled news-corpus loading.
//!
//! Reads a CSV with (at least) a label column and a text column, keeps rows
//! whose label matches the configured value, and returns the document texts
//! in file order. Columns are resolved by header name, not position, so
//! extra columns and arbitrary column order are fine.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::config::DatasetConfig;
use crate::error::{CastnetError, ErrorCode};

/// Load document texts from the CSV at `path`, keeping rows whose
/// `label_column` equals the configured label value.
///
/// # Errors
///
/// - [`ErrorCode::DatasetNotFound`] when the file cannot be opened.
/// - [`ErrorCode::MissingColumn`] when the label or text column is absent
///   from the header row.
/// - [`ErrorCode::MalformedCsv`] when a row cannot be parsed or is short.
/// - [`ErrorCode::EmptyDataset`] when no row matches the label filter.
#[instrument(skip(dataset), fields(path = %path.display()))]
pub fn load_documents(path: &Path, dataset: &DatasetConfig) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).map_err(|err| {
        CastnetError::new(
            ErrorCode::DatasetNotFound,
            format!("{}: {err}", path.display()),
        )
    })?;

    let headers = reader
        .headers()
        .map_err(|err| {
            CastnetError::new(ErrorCode::MalformedCsv, format!("header row: {err}"))
        })?
        .clone();

    let label_idx = column_index(&headers, &dataset.label_column)?;
    let text_idx = column_index(&headers, &dataset.text_column)?;

    let mut documents = Vec::new();
    let mut total_rows = 0usize;

    for (row, record) in reader.records().enumerate() {
        total_rows += 1;
        let record = record.map_err(|err| {
            CastnetError::new(ErrorCode::MalformedCsv, format!("row {}: {err}", row + 1))
        })?;

        let label = field(&record, label_idx, row, &dataset.label_column)?;
        if label != dataset.label {
            continue;
        }

        let text = field(&record, text_idx, row, &dataset.text_column)?;
        documents.push(text.to_string());
    }

    debug!(total_rows, kept = documents.len(), "label filter applied");

    if documents.is_empty() {
        return Err(CastnetError::new(
            ErrorCode::EmptyDataset,
            format!(
                "{} has no rows with {} = {:?}",
                path.display(),
                dataset.label_column,
                dataset.label
            ),
        )
        .into());
    }

    info!(
        documents = documents.len(),
        label = %dataset.label,
        "dataset loaded"
    );

    Ok(documents)
}

/// Resolve a column index by header name.
fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| CastnetError::new(ErrorCode::MissingColumn, format!("column {name:?}")))
        .context("resolving header columns")
}

/// Fetch a field from a record, flagging short rows as malformed.
fn field<'a>(
    record: &'a csv::StringRecord,
    idx: usize,
    row: usize,
    column: &str,
) -> Result<&'a str> {
    record.get(idx).ok_or_else(|| {
        CastnetError::new(
            ErrorCode::MalformedCsv,
            format!("row {} is missing column {column:?}", row + 1),
        )
        .into()
    })
}
