//! Line-delimited per-product output, the merge into one JSON array and the
//! CSV export of a merged file.

use std::collections::BTreeSet;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use makro_core::ProductRow;
use serde_json::Value;

use crate::error::ScraperError;

const FILE_PREFIX: &str = "makro_";
const FILE_EXTENSION: &str = "jsonl";
const CSV_DELIMITER: u8 = b';';
/// Cell written for a column the record does not have.
const MISSING_CELL: &str = "Not found";

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ScraperError + '_ {
    move |source| ScraperError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// File name for one product row: `makro_<productIdInSupermarket>.jsonl`.
///
/// Rows without a storefront identifier are named after `request_id`, the
/// identifier the product was requested under, so they never share a file.
#[must_use]
pub fn jsonl_file_name(row: &ProductRow, request_id: &str) -> String {
    let id = row
        .record
        .product_id_in_supermarket
        .as_deref()
        .filter(|id| !id.is_empty())
        .unwrap_or(request_id);
    let id = id.replace(['/', '\\'], "_");
    format!("{FILE_PREFIX}{id}.{FILE_EXTENSION}")
}

/// Writes `row` as a single JSON line into `dir`, replacing any earlier file
/// for the same product. Creates `dir` when missing. See [`jsonl_file_name`]
/// for how `request_id` is used.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] if the directory or file cannot be written and
/// [`ScraperError::Serialize`] if the row cannot be encoded.
pub fn write_product_jsonl(
    dir: &Path,
    row: &ProductRow,
    request_id: &str,
) -> Result<PathBuf, ScraperError> {
    fs::create_dir_all(dir).map_err(io_error(dir))?;

    let path = dir.join(jsonl_file_name(row, request_id));
    let mut line = serde_json::to_string(row).map_err(|source| ScraperError::Serialize {
        context: path.display().to_string(),
        source,
    })?;
    line.push('\n');

    fs::write(&path, line).map_err(io_error(&path))?;
    tracing::info!(path = %path.display(), "product written");
    Ok(path)
}

/// Merges every `*.jsonl` file in `input_dir` into a pretty-printed JSON array
/// at `output_file`. Returns the number of records written.
///
/// Files are read in file-name order. Blank lines are skipped. The parent
/// directory of `output_file` is created when missing.
///
/// # Errors
///
/// - [`ScraperError::Io`] if a file cannot be read or the output cannot be written.
/// - [`ScraperError::Deserialize`] naming the file and line of a malformed record.
pub fn merge_jsonl(input_dir: &Path, output_file: &Path) -> Result<usize, ScraperError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(input_dir).map_err(io_error(input_dir))? {
        let path = entry.map_err(io_error(input_dir))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == FILE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();

    let mut records = Vec::new();
    for path in &files {
        let content = fs::read_to_string(path).map_err(io_error(path))?;
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: Value =
                serde_json::from_str(line).map_err(|source| ScraperError::Deserialize {
                    context: format!("{} line {}", path.display(), index + 1),
                    source,
                })?;
            records.push(record);
        }
    }

    if let Some(parent) = output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    let json = serde_json::to_string_pretty(&records).map_err(|source| {
        ScraperError::Serialize {
            context: output_file.display().to_string(),
            source,
        }
    })?;
    let mut file = fs::File::create(output_file).map_err(io_error(output_file))?;
    file.write_all(json.as_bytes())
        .map_err(io_error(output_file))?;

    tracing::info!(
        files = files.len(),
        records = records.len(),
        output = %output_file.display(),
        "merged product files"
    );
    Ok(records.len())
}

/// Converts a merged JSON array of records into a `;`-delimited CSV file.
/// Returns the number of rows written.
///
/// Columns are the sorted union of all record keys. A record without a column
/// gets `Not found`, `null` gives an empty cell, strings are written as they
/// are and any other value as compact JSON.
///
/// # Errors
///
/// - [`ScraperError::Io`] if the input cannot be read or the output flushed.
/// - [`ScraperError::Deserialize`] if the input is not JSON.
/// - [`ScraperError::NotRecordArray`] if it is not an array of objects.
/// - [`ScraperError::Csv`] if the output cannot be written.
pub fn convert_to_csv(input_file: &Path, output_file: &Path) -> Result<usize, ScraperError> {
    let content = fs::read_to_string(input_file).map_err(io_error(input_file))?;
    let value: Value =
        serde_json::from_str(&content).map_err(|source| ScraperError::Deserialize {
            context: input_file.display().to_string(),
            source,
        })?;

    let not_records = || ScraperError::NotRecordArray {
        path: input_file.to_path_buf(),
    };
    let records = value
        .as_array()
        .ok_or_else(not_records)?
        .iter()
        .map(Value::as_object)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(not_records)?;
    let columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.keys().map(String::as_str))
        .collect();

    if let Some(parent) = output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    let csv_error = |source| ScraperError::Csv {
        path: output_file.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .from_path(output_file)
        .map_err(csv_error)?;

    if !columns.is_empty() {
        writer.write_record(&columns).map_err(csv_error)?;
    }
    for record in &records {
        let cells = columns.iter().map(|column| match record.get(*column) {
            None => MISSING_CELL.to_owned(),
            Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        });
        writer.write_record(cells).map_err(csv_error)?;
    }
    writer.flush().map_err(io_error(output_file))?;

    tracing::info!(
        rows = records.len(),
        columns = columns.len(),
        output = %output_file.display(),
        "converted records to csv"
    );
    Ok(records.len())
}
