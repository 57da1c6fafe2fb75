//! Console formatting for walk steps and path lists

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;

use termcolor::{Color, ColorSpec, WriteColor};

use crate::tree::Level;

use super::config::OutputConfig;

/// Formats walker steps as a directory header followed by its children.
pub struct LevelFormatter {
    config: OutputConfig,
    dir_count: usize,
    file_count: usize,
}

impl LevelFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self {
            config,
            dir_count: 0,
            file_count: 0,
        }
    }

    fn label<'a>(&self, path: &'a Path) -> Cow<'a, str> {
        if self.config.full_paths {
            return path.to_string_lossy();
        }
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy())
    }

    /// Write one step. Directories come first, then files, each in walk order.
    pub fn write_level(&mut self, out: &mut impl WriteColor, level: &Level) -> io::Result<()> {
        if self.dir_count > 0 {
            writeln!(out)?;
        }
        self.dir_count += 1;
        self.file_count += level.files.len();

        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "{}", level.dir.display())?;
        out.reset()?;
        writeln!(out, "  [depth {}]", level.depth)?;

        let total = level.dirs.len() + level.files.len();
        let children = level
            .dirs
            .iter()
            .map(|d| (d, true))
            .chain(level.files.iter().map(|f| (f, false)));
        for (i, (path, is_dir)) in children.enumerate() {
            let connector = if i + 1 == total { "└── " } else { "├── " };
            write!(out, "{}", connector)?;
            if is_dir {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
                write!(out, "{}/", self.label(path))?;
                out.reset()?;
            } else {
                write!(out, "{}", self.label(path))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Write the closing "N directories, M files" line.
    pub fn write_summary(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(
            out,
            "{} directories, {} files",
            self.dir_count, self.file_count
        )
    }
}

/// Write one path per line.
pub fn write_paths<P: AsRef<Path>>(out: &mut impl Write, paths: &[P]) -> io::Result<()> {
    for path in paths {
        writeln!(out, "{}", path.as_ref().display())?;
    }
    Ok(())
}

/// Write groups of paths separated by blank lines, one group per uncle.
pub fn write_groups<P: AsRef<Path>>(out: &mut impl Write, groups: &[Vec<P>]) -> io::Result<()> {
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_paths(out, group)?;
    }
    Ok(())
}
