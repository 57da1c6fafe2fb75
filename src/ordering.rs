//! Sort keys applied to directory listings.
//!
//! Directories and files at each level are sorted independently, each with
//! its own [`SortKey`]. The same key always produces the same order for the
//! same directory contents, which is what makes sibling positions stable
//! between repeated listings.

use std::cmp::{Ordering, Reverse};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::listing::EntryKind;

/// Comparator used by [`SortKey::Custom`].
pub type Comparator = Arc<dyn Fn(&Path, &Path) -> Ordering + Send + Sync>;

/// How entries of one kind are ordered within a directory.
///
/// Metadata based keys break ties by name so the order is total.
#[derive(Clone, Default)]
pub enum SortKey {
    /// Byte order of the entry name
    #[default]
    Name,
    /// Entry name compared case-insensitively, then by exact name
    NameIgnoreCase,
    /// File extension, then name
    Extension,
    /// Size in bytes, then name
    Size,
    /// Modification time, then name
    Modified,
    /// Any key in descending order
    Reversed(Box<SortKey>),
    /// Caller supplied comparator over full paths
    Custom(Comparator),
}

/// Precomputed key value so metadata is read once per entry, not per comparison.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Name(OsString),
    Folded(String, OsString),
    Extension(Option<OsString>, OsString),
    Size(Option<u64>, OsString),
    Modified(Option<SystemTime>, OsString),
}

impl SortKey {
    /// Wrap a comparator function as a sort key.
    pub fn custom<F>(compare: F) -> Self
    where
        F: Fn(&Path, &Path) -> Ordering + Send + Sync + 'static,
    {
        SortKey::Custom(Arc::new(compare))
    }

    /// The same key, descending.
    pub fn reversed(self) -> Self {
        match self {
            SortKey::Reversed(inner) => *inner,
            key => SortKey::Reversed(Box::new(key)),
        }
    }

    /// Sort `paths` in place, ascending by this key. Equal entries keep their
    /// relative order.
    pub fn sort(&self, paths: &mut [PathBuf]) {
        self.sort_directed(paths, false);
    }

    fn sort_directed(&self, paths: &mut [PathBuf], descending: bool) {
        match self {
            SortKey::Custom(compare) if descending => paths.sort_by(|a, b| compare(b, a)),
            SortKey::Custom(compare) => paths.sort_by(|a, b| compare(a, b)),
            SortKey::Reversed(inner) => inner.sort_directed(paths, !descending),
            key if descending => paths.sort_by_cached_key(|p| Reverse(key.value(p))),
            key => paths.sort_by_cached_key(|p| key.value(p)),
        }
    }

    fn value(&self, path: &Path) -> SortValue {
        let name = path.file_name().map(OsString::from).unwrap_or_default();
        match self {
            SortKey::NameIgnoreCase => {
                SortValue::Folded(name.to_string_lossy().to_lowercase(), name)
            }
            SortKey::Extension => SortValue::Extension(path.extension().map(OsString::from), name),
            SortKey::Size => SortValue::Size(path.metadata().ok().map(|m| m.len()), name),
            SortKey::Modified => SortValue::Modified(
                path.metadata().and_then(|m| m.modified()).ok(),
                name,
            ),
            // Custom and Reversed never reach here
            _ => SortValue::Name(name),
        }
    }
}

impl fmt::Debug for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => f.write_str("Name"),
            SortKey::NameIgnoreCase => f.write_str("NameIgnoreCase"),
            SortKey::Extension => f.write_str("Extension"),
            SortKey::Size => f.write_str("Size"),
            SortKey::Modified => f.write_str("Modified"),
            SortKey::Reversed(inner) => f.debug_tuple("Reversed").field(inner).finish(),
            SortKey::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// The pair of sort keys used for a tree: one for directories, one for files.
#[derive(Debug, Clone, Default)]
pub struct PathOrdering {
    dirs: SortKey,
    files: Option<SortKey>,
}

impl PathOrdering {
    /// Order both directories and files by `dir_key`.
    pub fn new(dir_key: SortKey) -> Self {
        Self {
            dirs: dir_key,
            files: None,
        }
    }

    /// Use a separate key for files.
    pub fn with_file_key(mut self, file_key: SortKey) -> Self {
        self.files = Some(file_key);
        self
    }

    pub fn dir_key(&self) -> &SortKey {
        &self.dirs
    }

    /// The file key, falling back to the directory key when none was given.
    pub fn file_key(&self) -> &SortKey {
        self.files.as_ref().unwrap_or(&self.dirs)
    }

    pub fn key_for(&self, kind: EntryKind) -> &SortKey {
        match kind {
            EntryKind::Directory => self.dir_key(),
            EntryKind::File => self.file_key(),
        }
    }

    /// Sort a listing of entries of one kind.
    pub fn sort(&self, kind: EntryKind, paths: &mut [PathBuf]) {
        self.key_for(kind).sort(paths);
    }
}
