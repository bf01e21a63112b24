// src/locate/members.rs

use std::{fs::File, io::Read, path::Path};
use zip::ZipArchive;

use crate::error::{BptError, Result};

fn open_archive(path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(path).map_err(|e| BptError::io(path, e))?;
    ZipArchive::new(file).map_err(|e| BptError::zip(path, e))
}

/// Names of the file entries in `path`, in archive order.
pub fn member_names(path: &Path) -> Result<Vec<String>> {
    let mut archive = open_archive(path)?;
    let mut names = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive.by_index(i).map_err(|e| BptError::zip(path, e))?;
        if entry.is_file() {
            names.push(entry.name().to_string());
        }
    }
    Ok(names)
}

/// Read one member fully into memory. The archive is closed on return.
pub fn read_member(path: &Path, member: &str) -> Result<Vec<u8>> {
    let mut archive = open_archive(path)?;
    let mut entry = archive
        .by_name(member)
        .map_err(|e| BptError::zip(path, e))?;
    let mut buf = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut buf)
        .map_err(|e| BptError::io(path.join(member), e))?;
    Ok(buf)
}

/// `true` if `name` ends with `ext` (given with its dot), ignoring case.
pub fn has_extension(name: &str, ext: &str) -> bool {
    name.to_lowercase().ends_with(&ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::write_zip;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn lists_files_and_reads_member() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bpt_ma_1.zip");
        write_zip(
            &path,
            &[("first.txt", b"one"), ("sub/", b""), ("sub/second.TXT", b"two")],
        )?;

        assert_eq!(member_names(&path)?, vec!["first.txt", "sub/second.TXT"]);
        assert_eq!(read_member(&path, "sub/second.TXT")?, b"two");
        assert!(has_extension("sub/second.TXT", ".txt"));
        assert!(!has_extension("first.txt.bak", ".txt"));
        Ok(())
    }

    #[test]
    fn corrupt_archive_is_zip_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("broken_ma_1.zip");
        std::fs::write(&path, b"not a zip at all")?;
        assert!(matches!(member_names(&path), Err(BptError::Zip { .. })));
        Ok(())
    }
}
