// src/config.rs

use regex::Regex;
use serde::Deserialize;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};
use tracing::debug;

use crate::error::{BptError, Result};

/// Key column every worksheet except the county parts is indexed by.
pub const BID_ID_COLUMN: &str = "BID ID (H-number, Plan ID, Segment ID)";

/// How to pick one archive member when several satisfy the selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// First candidate in sorted archive path order, then archive index order.
    #[default]
    First,
    /// Exactly one candidate, otherwise `AmbiguousMatch`.
    Unique,
}

/// Which columns of the data dictionary carry the code and its label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DictionarySchema {
    pub code_column: String,
    /// Regex matched against header names; exactly one header must match.
    pub label_pattern: String,
}

impl Default for DictionarySchema {
    fn default() -> Self {
        Self {
            code_column: "NAME".into(),
            label_pattern: "FIELD".into(),
        }
    }
}

impl DictionarySchema {
    pub fn label_regex(&self) -> Result<Regex> {
        Regex::new(&self.label_pattern).map_err(|e| {
            BptError::Config(format!("label_pattern `{}`: {}", self.label_pattern, e))
        })
    }
}

/// Cell values read as missing, in addition to the empty cell.
pub const DEFAULT_NULL_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Loader settings. Every field has a default, so a YAML file only needs
/// to name what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Years whose archives follow the `_ma` naming convention.
    pub legacy_years: Vec<String>,
    /// Also look for a legacy year in the ancestors of the year directory.
    pub legacy_match_ancestors: bool,
    pub legacy_archive_marker: String,
    pub dictionary_marker: String,
    pub dictionary: DictionarySchema,
    pub key_column: String,
    pub match_policy: MatchPolicy,
    pub infer_types: bool,
    /// Exact cell values parsed as null. The empty cell is always null.
    pub null_values: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            legacy_years: vec!["2014".into(), "2015".into()],
            legacy_match_ancestors: false,
            legacy_archive_marker: "_ma".into(),
            dictionary_marker: "dictionary".into(),
            dictionary: DictionarySchema::default(),
            key_column: BID_ID_COLUMN.into(),
            match_policy: MatchPolicy::First,
            infer_types: true,
            null_values: DEFAULT_NULL_VALUES.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl LoaderConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: LoaderConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| BptError::io(path, e))?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.key_column.trim().is_empty() {
            return Err(BptError::Config("key_column is empty".into()));
        }
        if self.dictionary.code_column.trim().is_empty() {
            return Err(BptError::Config("dictionary.code_column is empty".into()));
        }
        for (name, value) in [
            ("legacy_archive_marker", &self.legacy_archive_marker),
            ("dictionary_marker", &self.dictionary_marker),
        ] {
            if value.is_empty() {
                return Err(BptError::Config(format!("{} is empty", name)));
            }
        }
        self.dictionary.label_regex()?;
        Ok(())
    }
}

/// Archive naming scheme a year directory follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingConvention {
    /// Archives are named after the worksheet tag they hold.
    Standard,
    /// Archives carry the legacy marker; the tag only identifies members.
    Legacy,
}

/// A year directory resolved against a `LoaderConfig`.
#[derive(Debug, Clone)]
pub struct YearLayout {
    dir: PathBuf,
    year: String,
    convention: NamingConvention,
    config: LoaderConfig,
}

impl YearLayout {
    /// Resolve with the default configuration.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        Self::resolve(dir, &LoaderConfig::default())
    }

    /// Fails with `PathNotFound` if `dir` does not exist.
    pub fn resolve(dir: impl AsRef<Path>, config: &LoaderConfig) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Err(BptError::PathNotFound(dir.to_path_buf()));
        }
        config.validate()?;

        let segments: Vec<String> = dir
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let year = segments
            .last()
            .cloned()
            .unwrap_or_else(|| dir.display().to_string());

        let names_legacy_year =
            |seg: &str| config.legacy_years.iter().any(|y| seg.contains(y.as_str()));
        let legacy = if config.legacy_match_ancestors {
            segments.iter().any(|seg| names_legacy_year(seg.as_str()))
        } else {
            names_legacy_year(year.as_str())
        };
        let convention = if legacy {
            NamingConvention::Legacy
        } else {
            NamingConvention::Standard
        };
        debug!(dir = %dir.display(), year = %year, ?convention, "resolved year layout");

        Ok(Self {
            dir: dir.to_path_buf(),
            year,
            convention,
            config: config.clone(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn convention(&self) -> NamingConvention {
        self.convention
    }

    pub fn is_legacy(&self) -> bool {
        self.convention == NamingConvention::Legacy
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}
