// src/export.rs

use arrow::record_batch::RecordBatch;
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};
use tracing::{info, instrument};

use crate::bundle::Bpt;
use crate::error::{BptError, Result};

/// Write one table to `path` as Snappy-compressed Parquet.
pub fn write_parquet(batch: &RecordBatch, path: &Path) -> Result<u64> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BptError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| BptError::io(path, e))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    let size = fs::metadata(path).map_err(|e| BptError::io(path, e))?.len();
    Ok(size)
}

/// Write the dictionary and every worksheet of `bpt` under `<out_dir>/<year>/`.
/// Returns the written paths, dictionary first.
#[instrument(level = "info", skip(bpt, out_dir), fields(year = %bpt.year(), out = %out_dir.as_ref().display()))]
pub fn write_bundle_parquet(bpt: &Bpt, out_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let year_dir = out_dir.as_ref().join(bpt.year());
    let mut written = Vec::with_capacity(8);

    let dict_path = year_dir.join("data_dictionary.parquet");
    write_parquet(bpt.data_dict(), &dict_path)?;
    written.push(dict_path);

    for (ws, sheet) in bpt.sheets() {
        let path = year_dir.join(format!("{}.parquet", ws.tag()));
        let bytes = write_parquet(sheet, &path)?;
        info!(sheet = %ws, bytes, path = %path.display(), "wrote parquet");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::write_standard_year;
    use crate::worksheet::Worksheet;
    use anyhow::Result;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::tempdir;

    #[test]
    fn bundle_round_trips_through_parquet() -> Result<()> {
        let root = tempdir()?;
        let dir = root.path().join("2020");
        write_standard_year(&dir, "2020")?;
        let bpt = Bpt::load(&dir)?;

        let out = root.path().join("parquet");
        let written = write_bundle_parquet(&bpt, &out)?;
        assert_eq!(written.len(), 8);
        assert!(written[0].ends_with("2020/data_dictionary.parquet"));

        let ma3 = out.join("2020").join("ma_3.parquet");
        let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&ma3)?)?.build()?;
        let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
        let rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
        assert_eq!(rows, bpt.sheet(Worksheet::Ma3).num_rows());
        assert_eq!(
            batches[0].num_columns(),
            bpt.sheet(Worksheet::Ma3).num_columns()
        );
        Ok(())
    }
}
