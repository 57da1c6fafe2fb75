//! Common parent resolution and indexed search over sibling sets.
//!
//! Paths are handled as strings so Windows style inputs (drive letters, UNC
//! shares, backslashes) resolve the same way on every platform. Both `/` and
//! `\` are separators. Drive designators compare case-insensitively; path
//! components keep their case and compare exactly.

use std::cmp::Ordering;

use crate::error::{Conflict, Error, Result};

fn is_sep(b: u8) -> bool {
    b == b'/' || b == b'\\'
}

/// Split a drive letter (`C:`) or UNC share (`\\server\share`) off the front.
fn split_drive(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        return path.split_at(2);
    }
    if bytes.len() > 2 && is_sep(bytes[0]) && is_sep(bytes[1]) && !is_sep(bytes[2]) {
        let Some(server_end) = bytes[2..].iter().position(|&b| is_sep(b)).map(|i| i + 2) else {
            return ("", path);
        };
        let share_start = server_end + 1;
        let share_end = bytes[share_start..]
            .iter()
            .position(|&b| is_sep(b))
            .map_or(bytes.len(), |i| i + share_start);
        if share_end == share_start {
            return ("", path);
        }
        return path.split_at(share_end);
    }
    ("", path)
}

fn drives_match(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .bytes()
            .zip(b.bytes())
            .all(|(x, y)| (is_sep(x) && is_sep(y)) || x.eq_ignore_ascii_case(&y))
}

/// A path broken into drive, absoluteness and components, with empty and
/// `.` components dropped.
#[derive(Debug)]
struct SplitPath<'a> {
    drive: &'a str,
    absolute: bool,
    components: Vec<&'a str>,
}

impl<'a> SplitPath<'a> {
    fn parse(path: &'a str) -> Self {
        let (drive, rest) = split_drive(path);
        Self {
            drive,
            absolute: rest.bytes().next().is_some_and(is_sep),
            components: rest
                .split(['/', '\\'])
                .filter(|c| !c.is_empty() && *c != ".")
                .collect(),
        }
    }

    fn parent(&self) -> &[&'a str] {
        let n = self.components.len();
        &self.components[..n.saturating_sub(1)]
    }

    fn basename(&self) -> Option<&'a str> {
        self.components.last().copied()
    }

    fn has_parent(&self, common: &Common<'_>) -> bool {
        self.absolute == common.absolute
            && drives_match(self.drive, common.drive)
            && self.parent() == common.components.as_slice()
    }
}

/// The shared leading part of a set of split paths.
#[derive(Debug)]
struct Common<'a> {
    drive: &'a str,
    absolute: bool,
    components: Vec<&'a str>,
}

impl Common<'_> {
    fn render(&self, sep: char) -> String {
        let mut out = String::from(self.drive);
        if self.absolute {
            out.push(sep);
        }
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                out.push(sep);
            }
            out.push_str(component);
        }
        out
    }
}

fn common_prefix<'a>(paths: &[SplitPath<'a>]) -> Result<Common<'a>> {
    let first = paths.first().ok_or(Error::EmptyPathSet)?;
    if paths.iter().any(|p| p.absolute != first.absolute) {
        return Err(Error::Conflict(Conflict::MixedAbsolute));
    }
    if paths.iter().any(|p| !drives_match(p.drive, first.drive)) {
        return Err(Error::Conflict(Conflict::MixedDrives));
    }

    // The common prefix of a set equals the common prefix of its
    // lexicographic minimum and maximum.
    let (mut min, mut max) = (&first.components, &first.components);
    for p in &paths[1..] {
        if p.components < *min {
            min = &p.components;
        }
        if p.components > *max {
            max = &p.components;
        }
    }
    let shared = min.iter().zip(max.iter()).take_while(|(a, b)| a == b).count();

    Ok(Common {
        drive: first.drive,
        absolute: first.absolute,
        components: min[..shared].to_vec(),
    })
}

/// Separator used when rebuilding a path: whichever the first input uses.
fn separator_of(path: &str) -> char {
    path.chars().find(|&c| c == '/' || c == '\\').unwrap_or('/')
}

/// The deepest directory shared by every path in `paths`.
///
/// Fails with [`Error::EmptyPathSet`] for no input, and with
/// [`Error::Conflict`] when absolute and relative paths are mixed or the
/// paths sit on different drives. Relative paths with nothing in common
/// yield an empty string.
pub fn common_parent<S: AsRef<str>>(paths: &[S]) -> Result<String> {
    let parsed: Vec<SplitPath<'_>> = paths.iter().map(|p| SplitPath::parse(p.as_ref())).collect();
    let common = common_prefix(&parsed)?;
    debug_assert!(
        parsed.iter().all(|p| p.components.starts_with(&common.components)),
        "common parent must be an ancestor of every input"
    );
    Ok(common.render(separator_of(paths[0].as_ref())))
}

/// Final component of `path` after collapsing `.` and `..` lexically.
fn target_basename(path: &str) -> &str {
    let (_, rest) = split_drive(path);
    let mut stack: Vec<&str> = Vec::new();
    for component in rest.split(['/', '\\']) {
        match component {
            "" | "." => {}
            ".." if stack.last().is_some_and(|c| *c != "..") => {
                stack.pop();
            }
            c => stack.push(c),
        }
    }
    stack.last().copied().unwrap_or("")
}

/// Locates an entry by basename within a list of paths or names.
///
/// By default the candidates are full paths that must all sit directly in
/// one directory, and they are sorted before searching. Absence is reported
/// as `Ok(None)`, never as an error.
///
/// ```
/// use sortedwalk::IndexSearch;
///
/// let siblings = ["/a/d", "/a/b", "/a/c"];
/// assert_eq!(IndexSearch::new("/a/c").find(&siblings).unwrap(), Some(1));
/// assert_eq!(IndexSearch::new("/a/c").presorted().find(&siblings).unwrap(), Some(2));
/// assert_eq!(IndexSearch::new("x").find(&siblings).unwrap(), None);
/// ```
#[derive(Clone, Copy)]
pub struct IndexSearch<'a> {
    target: &'a str,
    comparator: Option<&'a dyn Fn(&str, &str) -> Ordering>,
    presorted: bool,
    paths: bool,
    exact_target: bool,
}

impl<'a> IndexSearch<'a> {
    pub fn new(target: &'a str) -> Self {
        Self {
            target,
            comparator: None,
            presorted: false,
            paths: true,
            exact_target: false,
        }
    }

    /// Trust the candidates' order instead of sorting them.
    pub fn presorted(mut self) -> Self {
        self.presorted = true;
        self
    }

    /// Treat candidates as bare names: no basename reduction, no parent check.
    pub fn names(mut self) -> Self {
        self.paths = false;
        self
    }

    /// Compare the target as given instead of reducing it to a basename.
    ///
    /// Use with [`names`](Self::names) when the target is already a file
    /// name, which may legally contain `\` on Unix.
    pub fn exact_target(mut self) -> Self {
        self.exact_target = true;
        self
    }

    /// Sort basenames with `comparator` instead of plain string order.
    pub fn compare_with(mut self, comparator: &'a dyn Fn(&str, &str) -> Ordering) -> Self {
        self.comparator = Some(comparator);
        self
    }

    /// Index of the first candidate whose basename equals the target's.
    ///
    /// With path candidates this fails with [`Error::Ambiguity`] when they do
    /// not share exactly one parent directory, and with [`Error::Conflict`]
    /// when they mix drives or absolute and relative forms.
    pub fn find<S: AsRef<str>>(&self, candidates: &[S]) -> Result<Option<usize>> {
        let key = if self.exact_target {
            self.target
        } else {
            target_basename(self.target)
        };

        let mut names: Vec<&str> = if self.paths {
            sibling_basenames(candidates)?
        } else {
            candidates.iter().map(|c| c.as_ref()).collect()
        };

        if !self.presorted {
            match self.comparator {
                Some(compare) => names.sort_by(|a, b| compare(a, b)),
                None => names.sort(),
            }
        }

        Ok(names.iter().position(|name| *name == key))
    }
}

/// Basenames of `candidates`, after checking they all share one parent.
fn sibling_basenames<S: AsRef<str>>(candidates: &[S]) -> Result<Vec<&str>> {
    let Some(first) = candidates.first() else {
        return Ok(Vec::new());
    };
    let parsed: Vec<SplitPath<'_>> = candidates
        .iter()
        .map(|c| SplitPath::parse(c.as_ref()))
        .collect();

    let mut common = common_prefix(&parsed)?;
    // A single distinct entry, possibly repeated, shares its own parent.
    if parsed.iter().all(|p| p.components == parsed[0].components) {
        common.components.pop();
    }

    parsed
        .iter()
        .zip(candidates)
        .map(|(split, candidate)| match split.basename() {
            Some(name) if split.has_parent(&common) => Ok(name),
            _ => Err(Error::Ambiguity {
                candidate: candidate.as_ref().to_string(),
                parent: common.render(separator_of(first.as_ref())),
            }),
        })
        .collect()
}
