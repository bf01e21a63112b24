// src/process/infer.rs

use arrow::{
    array::{Array, ArrayRef, Float64Builder, Int64Builder, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::sync::Arc;
use tracing::trace;

use crate::error::Result;

/// Infer a dtype from every non-null value of a string column.
///
/// All `i64` → Int64, else all `f64` → Float64, else Utf8.
/// A column without values stays Utf8.
pub fn infer_column_type(arr: &StringArray) -> DataType {
    let mut seen_any = false;
    let mut all_int = true;
    for v in arr.iter().flatten() {
        seen_any = true;
        let v = v.trim();
        if all_int && v.parse::<i64>().is_ok() {
            continue;
        }
        all_int = false;
        if v.parse::<f64>().is_err() {
            return DataType::Utf8;
        }
    }
    match (seen_any, all_int) {
        (false, _) => DataType::Utf8,
        (true, true) => DataType::Int64,
        (true, false) => DataType::Float64,
    }
}

/// Narrow every `Utf8` column of `batch` to its inferred numeric type.
pub fn convert_to_inferred_types(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields = Vec::with_capacity(batch.num_columns());
    let mut out = Vec::with_capacity(batch.num_columns());

    for (arr, fld) in batch.columns().iter().zip(schema.fields()) {
        let Some(sarr) = arr.as_any().downcast_ref::<StringArray>() else {
            fields.push(fld.as_ref().clone());
            out.push(arr.clone());
            continue;
        };

        let ty = infer_column_type(sarr);
        trace!(column = %fld.name(), ?ty, "inferred type");
        let converted: ArrayRef = match ty {
            DataType::Int64 => {
                let mut b = Int64Builder::with_capacity(sarr.len());
                for opt in sarr.iter() {
                    b.append_option(opt.and_then(|s| s.trim().parse().ok()));
                }
                Arc::new(b.finish())
            }
            DataType::Float64 => {
                let mut b = Float64Builder::with_capacity(sarr.len());
                for opt in sarr.iter() {
                    b.append_option(opt.and_then(|s| s.trim().parse().ok()));
                }
                Arc::new(b.finish())
            }
            _ => arr.clone(),
        };
        fields.push(Field::new(fld.name(), converted.data_type().clone(), true));
        out.push(converted);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(batch.num_rows()));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        out,
        &options,
    )?)
}
