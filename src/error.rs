//! Error types for sortedwalk
//!
//! Every failure is detected at the operation that triggers it and returned
//! to the caller. Running out of directories to visit is not an error; the
//! walker reports it as `Ok(None)`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by walking, relationship queries and path resolution.
#[derive(Error, Debug)]
pub enum Error {
    /// The path is not an existing directory
    #[error("'{}' is not an existing directory", path.display())]
    Validation { path: PathBuf },

    /// The path is the root itself, or lies outside the root's subtree
    #[error("'{}' has no parent inside '{}'", path.display(), root.display())]
    Boundary { path: PathBuf, root: PathBuf },

    /// The path set mixes absolute and relative paths, or spans several drives
    #[error("conflicting paths: {0}")]
    Conflict(Conflict),

    /// Candidates for an indexed search do not share exactly one parent
    #[error("'{candidate}' is not a child of common parent '{parent}'")]
    Ambiguity { candidate: String, parent: String },

    /// No paths were given to compute a common parent from
    #[error("cannot compute the common parent of an empty path set")]
    EmptyPathSet,

    /// The entry is missing from its parent's listing
    #[error("'{}' is not listed in '{}'", path.display(), parent.display())]
    NotFound { path: PathBuf, parent: PathBuf },

    /// Reading a directory failed
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The kind of inconsistency found in a path set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    MixedAbsolute,
    MixedDrives,
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conflict::MixedAbsolute => f.write_str("can't mix absolute and relative paths"),
            Conflict::MixedDrives => f.write_str("paths don't have the same drive"),
        }
    }
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
