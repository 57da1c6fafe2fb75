//! Live directory listing.
//!
//! Nothing here is cached: each call reads the directory again, so results
//! reflect the filesystem at the time of the call.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::Serialize;
use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::ordering::PathOrdering;
use crate::tree::WalkerConfig;

/// Which kind of child entry a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

/// Check that `path` exists and is a directory (symlinks followed).
pub fn exists_as_directory(path: &Path) -> bool {
    path.is_dir()
}

/// Names of all entries in `dir`, in whatever order the OS returns them.
pub fn list_directory_entries(dir: &Path) -> Result<Vec<OsString>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    entries
        .map(|entry| {
            entry
                .map(|e| e.file_name())
                .map_err(|e| Error::io(dir, e))
        })
        .collect()
}

fn classify(path: &Path) -> Option<EntryKind> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Some(EntryKind::Directory),
        Ok(meta) if meta.is_file() => Some(EntryKind::File),
        Ok(_) => None,
        Err(_) if fs::symlink_metadata(path).is_ok() => {
            trace!(path = %path.display(), "skipping dangling symlink");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "entry vanished while listing");
            None
        }
    }
}

/// Lists the children of a directory, filtered by configuration and sorted
/// by the kind's sort key.
#[derive(Debug, Clone)]
pub struct Lister {
    ordering: PathOrdering,
    ignore: Vec<Pattern>,
    show_hidden: bool,
}

impl Lister {
    pub fn new(ordering: PathOrdering, config: &WalkerConfig) -> Self {
        let ignore = config
            .ignore_patterns
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!(pattern = %p, error = %e, "ignoring invalid ignore pattern");
                    None
                }
            })
            .collect();
        Self {
            ordering,
            ignore,
            show_hidden: config.show_hidden,
        }
    }

    pub fn ordering(&self) -> &PathOrdering {
        &self.ordering
    }

    fn is_excluded(&self, name: &OsString) -> bool {
        let name = name.to_string_lossy();
        if !self.show_hidden && name.starts_with('.') {
            return true;
        }
        self.ignore.iter().any(|p| p.matches(&name))
    }

    /// Fresh, sorted listing of `dir`'s children of the given kind, as full paths.
    pub fn children(&self, dir: &Path, kind: EntryKind) -> Result<Vec<PathBuf>> {
        let mut children: Vec<PathBuf> = list_directory_entries(dir)?
            .into_iter()
            .filter(|name| !self.is_excluded(name))
            .map(|name| dir.join(name))
            .filter(|path| classify(path) == Some(kind))
            .collect();
        self.ordering.sort(kind, &mut children);
        trace!(dir = %dir.display(), ?kind, count = children.len(), "listed directory");
        Ok(children)
    }
}
