// src/process/read.rs

use arrow::{
    array::{ArrayRef, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use csv::ReaderBuilder;
use std::{collections::HashSet, io::Cursor, sync::Arc};
use tracing::debug;

use super::text::TextFormat;
use crate::error::{BptError, Result};

/// Parse one delimited member into a batch of nullable `Utf8` columns.
///
/// - The first record is the header row.
/// - Empty cells and cells equal to one of `null_values` are null; short
///   rows are padded with nulls.
/// - A row with more cells than the header is `MalformedRow`.
pub fn parse_delimited(
    bytes: &[u8],
    format: TextFormat,
    member: &str,
    null_values: &[String],
) -> Result<RecordBatch> {
    let nulls: HashSet<&str> = null_values.iter().map(String::as_str).collect();
    let text = format.decode(bytes, member);
    let mut rdr = ReaderBuilder::new()
        .delimiter(format.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(text.as_bytes()));

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| csv_error(member, e))?
        .iter()
        .map(str::to_string)
        .collect();
    let headers = unique_headers(headers);

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    let mut rows = 0usize;
    for result in rdr.records() {
        let record = result.map_err(|e| csv_error(member, e))?;
        if record.len() > headers.len() {
            return Err(BptError::MalformedRow {
                member: member.to_string(),
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                expected: headers.len(),
                found: record.len(),
            });
        }
        for (i, col) in columns.iter_mut().enumerate() {
            let cell = record
                .get(i)
                .filter(|v| !v.is_empty() && !nulls.contains(v));
            col.push(cell.map(str::to_string));
        }
        rows += 1;
    }
    debug!(member, rows, columns = headers.len(), "parsed member");

    let fields: Vec<Field> = headers
        .iter()
        .map(|n| Field::new(n, DataType::Utf8, true))
        .collect();
    let arrays: Vec<ArrayRef> = columns
        .into_iter()
        .map(|values| Arc::new(StringArray::from(values)) as ArrayRef)
        .collect();

    let options = RecordBatchOptions::new().with_row_count(Some(rows));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        arrays,
        &options,
    )?)
}

fn csv_error(member: &str, source: csv::Error) -> BptError {
    BptError::Csv {
        member: member.to_string(),
        source,
    }
}

/// Blank headers become `Unnamed: <index>`; repeats get a `.N` suffix.
fn unique_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    raw.into_iter()
        .enumerate()
        .map(|(i, name)| {
            let base = if name.trim().is_empty() {
                format!("Unnamed: {}", i)
            } else {
                name
            };
            let mut candidate = base.clone();
            let mut n = 1;
            while seen.contains(&candidate) {
                candidate = format!("{}.{}", base, n);
                n += 1;
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}
