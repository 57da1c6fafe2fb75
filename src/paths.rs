//! Path string utilities used by the walker and relationship queries.
//!
//! Everything here is lexical: no symlink resolution and no filesystem access
//! apart from reading the current directory when absolutizing.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Make `path` absolute and collapse `.` and `..` components lexically.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| Error::io(path, e))?;
    Ok(normalize(&absolute))
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root; leading `..` of a relative path is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Final component of the normalized path, if it has one.
pub fn basename(path: &Path) -> Option<&OsStr> {
    path.components().rev().find_map(|c| match c {
        Component::Normal(name) => Some(name),
        _ => None,
    })
}

/// Path from `base` to `path`, using `..` to climb out of `base` where needed.
///
/// Both arguments should already be normalized absolute paths. Returns `None`
/// when they live under different prefixes (drives) and no relative path exists.
pub fn relative_path(path: &Path, base: &Path) -> Option<PathBuf> {
    let mut ours = path.components().peekable();
    let mut theirs = base.components().peekable();

    match (ours.peek(), theirs.peek()) {
        (Some(Component::Prefix(a)), Some(Component::Prefix(b))) if a != b => return None,
        (Some(Component::Prefix(_)), Some(Component::Prefix(_))) => {}
        (Some(Component::Prefix(_)), _) | (_, Some(Component::Prefix(_))) => return None,
        _ => {}
    }

    while let (Some(a), Some(b)) = (ours.peek(), theirs.peek()) {
        if a != b {
            break;
        }
        ours.next();
        theirs.next();
    }

    let mut relative = PathBuf::new();
    for _ in theirs {
        relative.push(Component::ParentDir);
    }
    for component in ours {
        relative.push(component);
    }
    if relative.as_os_str().is_empty() {
        relative.push(Component::CurDir);
    }
    Some(relative)
}

/// True when reaching `path` from `base` never climbs above `base`.
pub fn is_within(path: &Path, base: &Path) -> bool {
    relative_path(path, base)
        .is_some_and(|rel| !rel.components().any(|c| c == Component::ParentDir))
}
