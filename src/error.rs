// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BptError {
    #[error("path {0:?} doesn't exist")]
    PathNotFound(PathBuf),

    #[error("no match found for {what}")]
    NoMatchFound { what: String },

    #[error("{} candidates match {what}: {candidates:?}", .candidates.len())]
    AmbiguousMatch {
        what: String,
        candidates: Vec<String>,
    },

    #[error("no parts found for {what}")]
    EmptyResult { what: String },

    #[error("ambiguous data dictionary schema: {0}")]
    AmbiguousDictionarySchema(String),

    #[error("key column `{column}` missing from {worksheet} after renaming")]
    KeyColumnMissing { column: String, worksheet: String },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("zip error in {path:?}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("CSV parse error in {member}: {source}")]
    Csv {
        member: String,
        #[source]
        source: csv::Error,
    },

    #[error("{member} line {line}: expected at most {expected} fields, found {found}")]
    MalformedRow {
        member: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("bad glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("YAML deserialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl BptError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BptError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn zip(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        BptError::Zip {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BptError>;
