// src/dictionary.rs

use arrow::{
    array::{Array, AsArray},
    compute::cast,
    datatypes::{DataType, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, warn};

use crate::config::DictionarySchema;
use crate::error::{BptError, Result};

/// A year's data dictionary: the raw table plus the validated
/// code → label mapping used to rename worksheet columns.
#[derive(Debug, Clone)]
pub struct DataDictionary {
    table: RecordBatch,
    label_column: String,
    mapping: HashMap<String, String>,
}

impl DataDictionary {
    /// Validate `table` against `schema` and build the mapping.
    ///
    /// Rows with a null code or label are skipped. A code listed twice with
    /// different labels is rejected.
    pub fn from_table(table: RecordBatch, schema: &DictionarySchema) -> Result<Self> {
        let label_re = schema.label_regex()?;
        let table_schema = table.schema();

        let code_idx = table_schema
            .index_of(&schema.code_column)
            .map_err(|_| {
                BptError::AmbiguousDictionarySchema(format!(
                    "code column `{}` not found",
                    schema.code_column
                ))
            })?;

        let label_cols: Vec<(usize, &str)> = table_schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(i, f)| *i != code_idx && label_re.is_match(f.name()))
            .map(|(i, f)| (i, f.name().as_str()))
            .collect();
        let (label_idx, label_column) = match label_cols.as_slice() {
            [single] => *single,
            [] => {
                return Err(BptError::AmbiguousDictionarySchema(format!(
                    "no column matches label pattern `{}`",
                    schema.label_pattern
                )))
            }
            many => {
                return Err(BptError::AmbiguousDictionarySchema(format!(
                    "{} columns match label pattern `{}`: {:?}",
                    many.len(),
                    schema.label_pattern,
                    many.iter().map(|(_, n)| *n).collect::<Vec<_>>()
                )))
            }
        };
        let label_column = label_column.to_string();

        let codes = cast(table.column(code_idx), &DataType::Utf8)?;
        let labels = cast(table.column(label_idx), &DataType::Utf8)?;
        let codes = codes.as_string::<i32>();
        let labels = labels.as_string::<i32>();

        let mut mapping: HashMap<String, String> = HashMap::with_capacity(codes.len());
        for (code, label) in codes.iter().zip(labels.iter()) {
            let (Some(code), Some(label)) = (code, label) else {
                continue;
            };
            match mapping.get(code) {
                Some(prev) if prev != label => {
                    return Err(BptError::AmbiguousDictionarySchema(format!(
                        "code `{}` maps to both `{}` and `{}`",
                        code, prev, label
                    )));
                }
                Some(_) => {}
                None => {
                    mapping.insert(code.to_string(), label.to_string());
                }
            }
        }
        debug!(
            codes = mapping.len(),
            label_column = %label_column,
            "built dictionary mapping"
        );

        Ok(Self {
            table,
            label_column,
            mapping,
        })
    }

    pub fn table(&self) -> &RecordBatch {
        &self.table
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    pub fn mapping(&self) -> &HashMap<String, String> {
        &self.mapping
    }

    pub fn label(&self, code: &str) -> Option<&str> {
        self.mapping.get(code).map(String::as_str)
    }

    /// Rename the columns of `sheet` whose name is a dictionary code.
    /// Other columns keep their names; data is untouched.
    pub fn rename(&self, sheet: &RecordBatch) -> Result<RecordBatch> {
        let schema = sheet.schema();
        let mut renamed = 0usize;
        let fields: Vec<_> = schema
            .fields()
            .iter()
            .map(|f| match self.mapping.get(f.name()) {
                Some(label) => {
                    renamed += 1;
                    f.as_ref().clone().with_name(label.clone())
                }
                None => f.as_ref().clone(),
            })
            .collect();

        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = fields.iter().find(|f| !seen.insert(f.name().as_str())) {
            warn!(column = %dup.name(), "renaming produced a repeated column name");
        }
        debug!(renamed, columns = fields.len(), "renamed worksheet columns");

        let new_schema = Schema::new_with_metadata(fields, schema.metadata().clone());
        let options = RecordBatchOptions::new().with_row_count(Some(sheet.num_rows()));
        Ok(RecordBatch::try_new_with_options(
            Arc::new(new_schema),
            sheet.columns().to_vec(),
            &options,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{parse_delimited, TextFormat};
    use crate::testutil::column_names;
    use anyhow::Result;

    fn dict(csv: &str) -> Result<RecordBatch> {
        Ok(parse_delimited(csv.as_bytes(), TextFormat::DICTIONARY, "dict.csv", &[])?)
    }

    fn sheet(header: &str) -> Result<RecordBatch> {
        Ok(parse_delimited(
            format!("{}\n", header).as_bytes(),
            TextFormat::WORKSHEET,
            "sheet.txt",
            &[],
        )?)
    }

    #[test]
    fn renames_known_codes_only() -> Result<()> {
        let d = DataDictionary::from_table(
            dict("NAME,FIELD_NAME\nF1,Plan Name\nF2,Region\n")?,
            &DictionarySchema::default(),
        )?;
        let out = d.rename(&sheet("F1\tF2\tF3")?)?;
        assert_eq!(column_names(&out), vec!["Plan Name", "Region", "F3"]);
        assert_eq!(d.label("F2"), Some("Region"));
        assert_eq!(d.label_column(), "FIELD_NAME");
        Ok(())
    }

    #[test]
    fn requires_code_column() -> Result<()> {
        let err = DataDictionary::from_table(
            dict("CODE,FIELD\nF1,Plan Name\n")?,
            &DictionarySchema::default(),
        )
        .unwrap_err();
        assert!(matches!(err, BptError::AmbiguousDictionarySchema(_)));
        Ok(())
    }

    #[test]
    fn rejects_zero_or_many_label_columns() -> Result<()> {
        for csv in ["NAME,LABEL\nF1,x\n", "NAME,FIELD_A,FIELD_B\nF1,x,y\n"] {
            let err = DataDictionary::from_table(dict(csv)?, &DictionarySchema::default())
                .unwrap_err();
            assert!(matches!(err, BptError::AmbiguousDictionarySchema(_)), "{csv}");
        }
        Ok(())
    }

    #[test]
    fn conflicting_duplicate_code_is_rejected() -> Result<()> {
        let ok = DataDictionary::from_table(
            dict("NAME,FIELD\nF1,Plan Name\nF1,Plan Name\n,orphan\nF9,\n")?,
            &DictionarySchema::default(),
        )?;
        assert_eq!(ok.mapping().len(), 1);

        let err = DataDictionary::from_table(
            dict("NAME,FIELD\nF1,Plan Name\nF1,Other\n")?,
            &DictionarySchema::default(),
        )
        .unwrap_err();
        assert!(matches!(err, BptError::AmbiguousDictionarySchema(_)));
        Ok(())
    }

    #[test]
    fn custom_schema_columns() -> Result<()> {
        let schema = DictionarySchema {
            code_column: "code".into(),
            label_pattern: "^label$".into(),
        };
        let d = DataDictionary::from_table(dict("code,label,label_note\nF1,Plan\n")?, &schema)?;
        assert_eq!(d.label("F1"), Some("Plan"));
        Ok(())
    }
}
