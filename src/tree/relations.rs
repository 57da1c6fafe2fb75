//! Parent, sibling and cousin queries bounded to a root directory.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::common::IndexSearch;
use crate::error::{Error, Result};
use crate::listing::{EntryKind, Lister, exists_as_directory};
use crate::ordering::PathOrdering;
use crate::paths::{absolutize, is_within};

use super::config::WalkerConfig;

/// Which siblings to select, by position in ascending sort order.
///
/// Position 0 is the "youngest"; the names carry no chronological meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Entries sorted after the target
    Older,
    /// Entries sorted before the target
    Younger,
    /// Every entry except the target, order preserved
    #[default]
    All,
}

impl Relation {
    /// Slice `items` around `index`, which must be in bounds.
    fn select<T>(self, mut items: Vec<T>, index: usize) -> Vec<T> {
        match self {
            Relation::Younger => {
                items.truncate(index);
                items
            }
            Relation::Older => items.split_off(index + 1),
            Relation::All => {
                items.remove(index);
                items
            }
        }
    }
}

fn file_name_lossy(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default()
}

/// Relationship queries over the subtree below `root`.
///
/// Every query lists directories afresh; nothing is remembered between calls.
#[derive(Debug, Clone)]
pub struct Relatives {
    root: PathBuf,
    lister: Lister,
}

impl Relatives {
    pub fn new(root: impl AsRef<Path>, ordering: PathOrdering) -> Result<Self> {
        Self::with_config(root, ordering, &WalkerConfig::default())
    }

    pub fn with_config(
        root: impl AsRef<Path>,
        ordering: PathOrdering,
        config: &WalkerConfig,
    ) -> Result<Self> {
        let root = root.as_ref();
        if !exists_as_directory(root) {
            return Err(Error::Validation {
                path: root.to_path_buf(),
            });
        }
        Ok(Self::from_parts(absolutize(root)?, Lister::new(ordering, config)))
    }

    pub(crate) fn from_parts(root: PathBuf, lister: Lister) -> Self {
        Self { root, lister }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn lister(&self) -> &Lister {
        &self.lister
    }

    /// Immediate parent of `path`.
    ///
    /// Fails with [`Error::Boundary`] for the root itself and for anything
    /// outside the root's subtree. The parent is derived from the path string
    /// alone; its existence is not checked.
    pub fn parent(&self, path: &Path) -> Result<PathBuf> {
        let path = absolutize(path)?;
        let boundary = || Error::Boundary {
            path: path.clone(),
            root: self.root.clone(),
        };
        if path == self.root || !is_within(&path, &self.root) {
            return Err(boundary());
        }
        path.parent().map(Path::to_path_buf).ok_or_else(boundary)
    }

    /// Entries of `kind` that share `path`'s parent, selected by `relation`
    /// and returned in ascending sort order.
    pub fn siblings(
        &self,
        path: &Path,
        relation: Relation,
        kind: EntryKind,
    ) -> Result<Vec<PathBuf>> {
        let path = absolutize(path)?;
        let parent = self.parent(&path)?;
        let listed = self.lister.children(&parent, kind)?;

        // Listings share one parent by construction, so search bare file names.
        let found = {
            let names: Vec<Cow<'_, str>> = listed.iter().map(|p| file_name_lossy(p)).collect();
            let target = file_name_lossy(&path);
            IndexSearch::new(&target)
                .names()
                .exact_target()
                .presorted()
                .find(&names)?
        };
        let index = found.ok_or_else(|| Error::NotFound {
            path: path.clone(),
            parent: parent.clone(),
        })?;

        debug!(path = %path.display(), ?relation, ?kind, index, of = listed.len(), "siblings");
        Ok(relation.select(listed, index))
    }

    /// Children of `kind` of each of `path`'s uncles (the parent's sibling
    /// directories chosen by `relation`), one inner list per uncle in sort order.
    pub fn cousins(
        &self,
        path: &Path,
        relation: Relation,
        kind: EntryKind,
    ) -> Result<Vec<Vec<PathBuf>>> {
        let parent = self.parent(path)?;
        let uncles = self.siblings(&parent, relation, EntryKind::Directory)?;
        debug!(path = %path.display(), uncles = uncles.len(), "cousins");
        uncles
            .iter()
            .map(|uncle| self.lister.children(uncle, kind))
            .collect()
    }

    /// Same as [`Relatives::cousins`], concatenated uncle by uncle.
    pub fn cousins_flat(
        &self,
        path: &Path,
        relation: Relation,
        kind: EntryKind,
    ) -> Result<Vec<PathBuf>> {
        Ok(self.cousins(path, relation, kind)?.into_iter().flatten().collect())
    }
}
