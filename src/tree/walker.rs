//! SortedWalker - breadth-first traversal in sort order

use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::listing::{EntryKind, Lister, exists_as_directory};
use crate::ordering::PathOrdering;
use crate::paths::absolutize;

use super::config::WalkerConfig;
use super::relations::Relatives;

/// One step of a walk: a directory and its freshly sorted children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Level {
    pub dir: PathBuf,
    /// Distance from the root, which is depth 0
    pub depth: usize,
    pub dirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

impl Level {
    /// The (directory, child directories, child files) triple.
    pub fn into_parts(self) -> (PathBuf, Vec<PathBuf>, Vec<PathBuf>) {
        (self.dir, self.dirs, self.files)
    }
}

#[derive(Debug, Clone)]
struct WalkState {
    current: PathBuf,
    queue: VecDeque<(PathBuf, usize)>,
    /// Child directories of the most recent directory that opened a new level
    known_children: Vec<PathBuf>,
}

/// Breadth-first walker that visits directories in sort order.
///
/// All directories at depth k are visited, parent by parent in sort order,
/// before any directory at depth k + 1. Each step lists the directory afresh.
/// The walk is single pass: once exhausted it stays exhausted.
#[derive(Debug)]
pub struct SortedWalker {
    relatives: Relatives,
    max_depth: Option<usize>,
    state: WalkState,
}

impl SortedWalker {
    pub fn new(top: impl AsRef<Path>, ordering: PathOrdering) -> Result<Self> {
        Self::with_config(top, ordering, WalkerConfig::default())
    }

    /// Fails with [`Error::Validation`] if `top` is not an existing directory.
    pub fn with_config(
        top: impl AsRef<Path>,
        ordering: PathOrdering,
        config: WalkerConfig,
    ) -> Result<Self> {
        let top = top.as_ref();
        if !exists_as_directory(top) {
            return Err(Error::Validation {
                path: top.to_path_buf(),
            });
        }
        let root = absolutize(top)?;
        let lister = Lister::new(ordering, &config);
        let known_children = lister.children(&root, EntryKind::Directory)?;

        debug!(root = %root.display(), "starting sorted walk");
        Ok(Self {
            state: WalkState {
                current: root.clone(),
                queue: VecDeque::from([(root.clone(), 0)]),
                known_children,
            },
            relatives: Relatives::from_parts(root, lister),
            max_depth: config.max_depth,
        })
    }

    pub fn root(&self) -> &Path {
        self.relatives.root()
    }

    /// The directory emitted by the last successful step (the root before the first).
    pub fn current_dir(&self) -> &Path {
        &self.state.current
    }

    /// Child directories recorded when the walk last entered a new level.
    pub fn level_siblings(&self) -> &[PathBuf] {
        &self.state.known_children
    }

    /// Number of directories still waiting to be visited.
    pub fn pending(&self) -> usize {
        self.state.queue.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.queue.is_empty()
    }

    /// Relationship queries over this walker's root, using the same ordering.
    pub fn relatives(&self) -> &Relatives {
        &self.relatives
    }

    pub fn ordering(&self) -> &PathOrdering {
        self.relatives.lister().ordering()
    }

    /// Fresh sorted listing of `dir`'s children of `kind`.
    pub fn children(&self, dir: &Path, kind: EntryKind) -> Result<Vec<PathBuf>> {
        self.relatives.lister().children(&absolutize(dir)?, kind)
    }

    /// Drop the next directory from the queue without visiting it.
    ///
    /// A failed [`advance`](Self::advance) leaves the queue untouched, so this
    /// is how a caller moves past a directory that can no longer be read.
    pub fn skip_pending(&mut self) -> Option<PathBuf> {
        let (dir, _) = self.state.queue.pop_front()?;
        debug!(dir = %dir.display(), "skipped pending directory");
        Some(dir)
    }

    /// Visit the next directory.
    ///
    /// Returns `Ok(None)` once every directory has been visited. On error the
    /// walker's state is exactly as it was before the call.
    pub fn advance(&mut self) -> Result<Option<Level>> {
        let Some((dir, depth)) = self.state.queue.front().cloned() else {
            return Ok(None);
        };

        if !exists_as_directory(&dir) {
            return Err(Error::Validation { path: dir });
        }
        let lister = self.relatives.lister();
        let dirs = lister.children(&dir, EntryKind::Directory)?;
        let files = lister.children(&dir, EntryKind::File)?;

        let state = &mut self.state;
        state.queue.pop_front();
        if state.known_children.contains(&dir) {
            state.known_children = dirs.clone();
        }
        if self.max_depth.is_none_or(|max| depth < max) {
            state
                .queue
                .extend(dirs.iter().map(|d| (d.clone(), depth + 1)));
        }
        state.current = dir.clone();

        debug!(
            dir = %dir.display(),
            depth,
            dirs = dirs.len(),
            files = files.len(),
            pending = state.queue.len(),
            "visited directory"
        );
        Ok(Some(Level {
            dir,
            depth,
            dirs,
            files,
        }))
    }
}

/// Iterating yields an error once per failing directory and then moves on to
/// the next pending one, so adapters like `flatten` always terminate. Use
/// [`SortedWalker::advance`] directly to retry a failed directory instead.
impl Iterator for SortedWalker {
    type Item = Result<Level>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(level) => level.map(Ok),
            Err(e) => {
                self.skip_pending();
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for SortedWalker {}
