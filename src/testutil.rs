// src/testutil.rs
//
// Fixture builders shared by the unit tests.

use anyhow::{Context, Result};
use arrow::{array::AsArray, compute::cast, datatypes::DataType, record_batch::RecordBatch};
use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::worksheet::Worksheet;

pub fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,bptload=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Write a zip at `path`. Entry names ending in `/` become directories.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, data) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options)?;
        } else {
            zip.start_file(*name, options)?;
            zip.write_all(data)?;
        }
    }
    zip.finish()?;
    Ok(())
}

/// Encode `text` as windows-1252, the way worksheet members are shipped.
pub fn cp1252(text: &str) -> Vec<u8> {
    let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(text);
    assert!(!had_errors, "fixture text not representable in cp1252");
    bytes.into_owned()
}

/// Column `name` of `batch` rendered as strings, nulls as `None`.
pub fn column_strings(batch: &RecordBatch, name: &str) -> Vec<Option<String>> {
    let col = batch
        .column_by_name(name)
        .unwrap_or_else(|| panic!("column `{}` missing", name));
    let utf8 = cast(col, &DataType::Utf8).expect("cast to utf8");
    utf8.as_string::<i32>()
        .iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}

pub const DICTIONARY_CSV: &str = "NAME,FIELD_DESCRIPTION,SHEET\n\
BIDID,\"BID ID (H-number, Plan ID, Segment ID)\",all\n\
F1,Plan Name,all\n\
F2,Region,all\n";

/// Tab-separated worksheet body for `ws`; the second row has no bid id.
pub fn sheet_text(ws: Worksheet) -> String {
    format!(
        "BIDID\tF1\tF2\tVAL_{tag}\n\
         H0001_001_0\tCafé Plan\tEast\t1\n\
         \tOrphan\tWest\t2\n\
         H0002_002_0\tGamma\tNorth\t3\n",
        tag = ws.tag()
    )
}

/// A complete year using the standard naming convention.
pub fn write_standard_year(dir: &Path, year: &str) -> Result<()> {
    fs::create_dir_all(dir)?;
    write_zip(
        &dir.join(format!("bpt{}_dictionary.zip", year)),
        &[("data_dictionary.csv", DICTIONARY_CSV.as_bytes())],
    )?;
    for ws in Worksheet::ALL {
        let body = cp1252(&sheet_text(ws));
        let member = format!("{}_data.txt", ws.tag());
        write_zip(
            &dir.join(format!("bpt{}_{}.zip", year, ws.tag())),
            &[(member.as_str(), body.as_slice())],
        )?;
    }
    Ok(())
}
