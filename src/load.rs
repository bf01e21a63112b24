// src/load.rs

//! Loaders for one year directory: dictionary, single worksheets, the
//! multi-part benchmark data, and the renamed/filtered worksheet view.

use arrow::{
    compute::{filter_record_batch, is_not_null},
    record_batch::RecordBatch,
};
use std::path::PathBuf;
use tracing::{debug, info, instrument};

use crate::config::YearLayout;
use crate::dictionary::DataDictionary;
use crate::error::{BptError, Result};
use crate::locate::{self, find_archives, has_extension, select_member};
use crate::process::{concat_columns, parse_member, TextFormat};
use crate::worksheet::Worksheet;

const ARCHIVE_CSV: &str = ".csv";
const ARCHIVE_TXT: &str = ".txt";

/// Find the dictionary archive and parse its CSV member.
#[instrument(level = "info", skip(layout), fields(dir = %layout.dir().display()))]
pub fn load_data_dict(layout: &YearLayout) -> Result<RecordBatch> {
    let cfg = layout.config();
    let archives = find_archives(layout.dir(), &cfg.dictionary_marker)?;
    debug!(archives = archives.len(), "dictionary archives");

    let picked = select_member(
        &archives,
        |m| has_extension(m, ARCHIVE_CSV),
        cfg.match_policy,
        &format!("data dictionary in {}", layout.dir().display()),
    )?;
    let bytes = picked.read()?;
    // never inferred: codes must match worksheet headers verbatim
    let table = parse_member(
        &bytes,
        TextFormat::DICTIONARY,
        &picked.member,
        &cfg.null_values,
        false,
    )?;
    info!(
        member = %picked,
        rows = table.num_rows(),
        columns = table.num_columns(),
        "loaded data dictionary"
    );
    Ok(table)
}

/// `load_data_dict` followed by schema validation.
pub fn load_dictionary(layout: &YearLayout) -> Result<DataDictionary> {
    let table = load_data_dict(layout)?;
    DataDictionary::from_table(table, &layout.config().dictionary)
}

/// Archives that may hold `ws` under the year's naming convention.
pub fn sheet_archives(layout: &YearLayout, ws: Worksheet) -> Result<Vec<PathBuf>> {
    let needle = if layout.is_legacy() {
        layout.config().legacy_archive_marker.as_str()
    } else {
        ws.tag()
    };
    find_archives(layout.dir(), needle)
}

/// Load one worksheet as tab separated cp1252 text.
///
/// In legacy years the archive is chosen by the legacy marker and the
/// worksheet tag only picks the member inside it.
#[instrument(level = "info", skip(layout), fields(dir = %layout.dir().display(), sheet = %ws))]
pub fn load_sheet(layout: &YearLayout, ws: Worksheet) -> Result<RecordBatch> {
    let cfg = layout.config();
    let archives = sheet_archives(layout, ws)?;
    debug!(archives = archives.len(), legacy = layout.is_legacy(), "sheet archives");

    let tag = ws.tag();
    let picked = select_member(
        &archives,
        |m| m.contains(tag),
        cfg.match_policy,
        &format!("worksheet {} in {}", tag, layout.dir().display()),
    )?;
    let bytes = picked.read()?;
    let table = parse_member(
        &bytes,
        TextFormat::WORKSHEET,
        &picked.member,
        &cfg.null_values,
        cfg.infer_types,
    )?;
    debug!(
        member = %picked,
        rows = table.num_rows(),
        columns = table.num_columns(),
        "loaded sheet"
    );
    Ok(table)
}

/// Load every text part of the benchmark data and place them side by side.
///
/// All archives whose name contains the worksheet tag are read in path
/// order. Legacy years only take `.txt` members naming the benchmark tag;
/// other years take every `.txt` member.
#[instrument(level = "info", skip(layout), fields(dir = %layout.dir().display(), sheet = %ws))]
pub fn load_county_data(layout: &YearLayout, ws: Worksheet) -> Result<RecordBatch> {
    let cfg = layout.config();
    let archives = find_archives(layout.dir(), ws.tag())?;
    let legacy = layout.is_legacy();
    let benchmark = Worksheet::BENCHMARK.tag();

    let members = locate::collect_members(&archives, |m| {
        has_extension(m, ARCHIVE_TXT) && (!legacy || m.contains(benchmark))
    })?;
    if members.is_empty() {
        return Err(BptError::EmptyResult {
            what: format!("county data {} in {}", ws.tag(), layout.dir().display()),
        });
    }

    let mut parts = Vec::with_capacity(members.len());
    for candidate in &members {
        let bytes = candidate.read()?;
        let part = parse_member(
            &bytes,
            TextFormat::WORKSHEET,
            &candidate.member,
            &cfg.null_values,
            cfg.infer_types,
        )?;
        debug!(part = %candidate, rows = part.num_rows(), "county part");
        parts.push(part);
    }

    let table = concat_columns(&parts)?;
    info!(
        parts = parts.len(),
        rows = table.num_rows(),
        columns = table.num_columns(),
        "loaded county data"
    );
    Ok(table)
}

/// `load_county_data` for the benchmark worksheet.
pub fn load_benchmark(layout: &YearLayout) -> Result<RecordBatch> {
    load_county_data(layout, Worksheet::BENCHMARK)
}

/// Load a worksheet, rename its columns through `dict`, and drop rows
/// without a key.
pub fn data_loader(
    layout: &YearLayout,
    ws: Worksheet,
    dict: &DataDictionary,
) -> Result<RecordBatch> {
    let sheet = load_sheet(layout, ws)?;
    let renamed = dict.rename(&sheet)?;
    drop_null_keys(&renamed, &layout.config().key_column, ws)
}

/// Remove rows whose `key` column is null.
pub fn drop_null_keys(batch: &RecordBatch, key: &str, ws: Worksheet) -> Result<RecordBatch> {
    let idx = batch
        .schema()
        .index_of(key)
        .map_err(|_| BptError::KeyColumnMissing {
            column: key.to_string(),
            worksheet: ws.tag().to_string(),
        })?;
    let mask = is_not_null(batch.column(idx).as_ref())?;
    let kept = filter_record_batch(batch, &mask)?;
    debug!(
        sheet = %ws,
        dropped = batch.num_rows() - kept.num_rows(),
        kept = kept.num_rows(),
        "dropped rows without key"
    );
    Ok(kept)
}
