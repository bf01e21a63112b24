// src/process/mod.rs

pub mod concat;
pub mod infer;
pub mod read;
pub mod text;

use arrow::record_batch::RecordBatch;

use crate::error::Result;

pub use concat::concat_columns;
pub use infer::{convert_to_inferred_types, infer_column_type};
pub use read::parse_delimited;
pub use text::TextFormat;

/// Parse a member and, when `infer_types` is set, narrow numeric columns.
pub fn parse_member(
    bytes: &[u8],
    format: TextFormat,
    member: &str,
    null_values: &[String],
    infer_types: bool,
) -> Result<RecordBatch> {
    let raw = parse_delimited(bytes, format, member, null_values)?;
    if infer_types {
        convert_to_inferred_types(&raw)
    } else {
        Ok(raw)
    }
}
