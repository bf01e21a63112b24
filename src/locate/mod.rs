// src/locate/mod.rs

//! Archive discovery and member selection.
//!
//! Candidates are always enumerated in the same order: archive paths sorted,
//! then members in archive index order. `MatchPolicy` decides what happens
//! when more than one candidate satisfies the selection rule.

pub mod archives;
pub mod members;

use std::{
    fmt,
    path::{Path, PathBuf},
};
use tracing::{debug, trace};

use crate::config::MatchPolicy;
use crate::error::{BptError, Result};

pub use archives::{all_archives, find_archives};
pub use members::{has_extension, member_names, read_member};

/// One member inside one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub archive: PathBuf,
    pub member: String,
}

impl Candidate {
    pub fn read(&self) -> Result<Vec<u8>> {
        read_member(&self.archive, &self.member)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}", self.archive.display(), self.member)
    }
}

/// Every member of every archive in `archives` accepted by `accept`.
pub fn collect_members<F>(archives: &[PathBuf], accept: F) -> Result<Vec<Candidate>>
where
    F: Fn(&str) -> bool,
{
    let mut out = Vec::new();
    for archive in archives {
        for member in member_names(archive)? {
            if accept(member.as_str()) {
                trace!(archive = %archive.display(), member = %member, "candidate member");
                out.push(Candidate {
                    archive: archive.clone(),
                    member,
                });
            }
        }
    }
    Ok(out)
}

/// Pick exactly one member according to `policy`.
///
/// `what` describes the selection for error messages.
pub fn select_member<F>(
    archives: &[PathBuf],
    accept: F,
    policy: MatchPolicy,
    what: &str,
) -> Result<Candidate>
where
    F: Fn(&str) -> bool,
{
    let picked = match policy {
        MatchPolicy::First => {
            let mut found = None;
            for archive in archives {
                let first = member_names(archive)?
                    .into_iter()
                    .find(|m| accept(m.as_str()));
                if let Some(member) = first {
                    found = Some(Candidate {
                        archive: archive.clone(),
                        member,
                    });
                    break;
                }
            }
            found
        }
        MatchPolicy::Unique => {
            let mut all = collect_members(archives, &accept)?;
            if all.len() > 1 {
                return Err(BptError::AmbiguousMatch {
                    what: what.to_string(),
                    candidates: all.iter().map(ToString::to_string).collect(),
                });
            }
            all.pop()
        }
    };

    let picked = picked.ok_or_else(|| BptError::NoMatchFound {
        what: what.to_string(),
    })?;
    debug!(%picked, what, "selected member");
    Ok(picked)
}

/// An archive and the file entries it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveListing {
    pub path: PathBuf,
    pub members: Vec<String>,
}

/// Every archive under `dir` with its member names.
pub fn list_archives(dir: &Path) -> Result<Vec<ArchiveListing>> {
    if !dir.exists() {
        return Err(BptError::PathNotFound(dir.to_path_buf()));
    }
    all_archives(dir)?
        .into_iter()
        .map(|path| {
            let members = member_names(&path)?;
            Ok(ArchiveListing { path, members })
        })
        .collect()
}
