// src/process/concat.rs

use arrow::{
    array::{new_null_array, ArrayRef},
    compute::concat,
    datatypes::{Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::sync::Arc;
use tracing::warn;

use crate::error::Result;

/// Place `parts` side by side, in order.
///
/// Rows are aligned by position. Parts shorter than the longest one are
/// padded with trailing nulls. Column names are kept as they are, so two
/// parts sharing a header produce a repeated column name.
pub fn concat_columns(parts: &[RecordBatch]) -> Result<RecordBatch> {
    let rows = parts.iter().map(RecordBatch::num_rows).max().unwrap_or(0);

    let mut fields: Vec<Field> = Vec::new();
    let mut columns: Vec<ArrayRef> = Vec::new();
    for (idx, part) in parts.iter().enumerate() {
        let pad = rows - part.num_rows();
        if pad > 0 {
            warn!(
                part = idx,
                part_rows = part.num_rows(),
                rows,
                "part shorter than the longest; padding with nulls"
            );
        }
        let schema = part.schema();
        for (col, fld) in part.columns().iter().zip(schema.fields()) {
            let col = if pad > 0 {
                let nulls = new_null_array(col.data_type(), pad);
                concat(&[col.as_ref(), nulls.as_ref()])?
            } else {
                col.clone()
            };
            fields.push(fld.as_ref().clone().with_nullable(true));
            columns.push(col);
        }
    }

    let options = RecordBatchOptions::new().with_row_count(Some(rows));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        columns,
        &options,
    )?)
}
