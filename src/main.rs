//! CLI entry point for sortedwalk

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sortedwalk::output::{write_groups, write_json_line, write_paths};
use sortedwalk::{
    EntryKind, LevelFormatter, OutputConfig, PathOrdering, Relation, Relatives, SortKey,
    SortedWalker, WalkerConfig, common_parent, print_json,
};
use termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::EnvFilter;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

/// Sort key names accepted on the command line
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum SortArg {
    /// Entry name, byte order
    #[default]
    Name,
    /// Entry name, case-insensitive
    IgnoreCase,
    /// File extension, then name
    Ext,
    /// Size in bytes
    Size,
    /// Modification time
    Mtime,
}

impl SortArg {
    fn key(self, reverse: bool) -> SortKey {
        let key = match self {
            SortArg::Name => SortKey::Name,
            SortArg::IgnoreCase => SortKey::NameIgnoreCase,
            SortArg::Ext => SortKey::Extension,
            SortArg::Size => SortKey::Size,
            SortArg::Mtime => SortKey::Modified,
        };
        if reverse { key.reversed() } else { key }
    }
}

/// Sibling relation names accepted on the command line
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum RelationArg {
    /// Entries sorted after the target
    Older,
    /// Entries sorted before the target
    Younger,
    /// Every other entry
    #[default]
    All,
}

impl From<RelationArg> for Relation {
    fn from(arg: RelationArg) -> Self {
        match arg {
            RelationArg::Older => Relation::Older,
            RelationArg::Younger => Relation::Younger,
            RelationArg::All => Relation::All,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sortedwalk")]
#[command(about = "Breadth-first sorted directory walks with sibling and cousin queries")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk breadth-first, printing each directory with its sorted children
    Walk {
        /// Directory to walk
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        order: OrderArgs,

        /// Descend only N levels deep
        #[arg(short = 'L', long = "level")]
        level: Option<usize>,

        /// Print full paths of children
        #[arg(short = 'f', long = "full-paths")]
        full_paths: bool,

        /// Output one JSON object per directory
        #[arg(long = "json")]
        json: bool,

        /// Control color output: auto, always, never
        #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
        color: ColorMode,
    },
    /// Print the parent of PATH within the root
    Parent {
        path: PathBuf,

        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Print the siblings of PATH in sort order
    Siblings {
        path: PathBuf,

        #[command(flatten)]
        scope: ScopeArgs,

        #[command(flatten)]
        order: OrderArgs,

        #[command(flatten)]
        query: QueryArgs,
    },
    /// Print the cousins of PATH, grouped by uncle
    Cousins {
        path: PathBuf,

        #[command(flatten)]
        scope: ScopeArgs,

        #[command(flatten)]
        order: OrderArgs,

        #[command(flatten)]
        query: QueryArgs,

        /// Print one flat list instead of a group per uncle
        #[arg(long = "flat")]
        flat: bool,
    },
    /// Print the deepest directory shared by all PATHS
    Common {
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct ScopeArgs {
    /// Root of the tree; queries never look above it
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

#[derive(Args, Debug)]
struct OrderArgs {
    /// Sort key for directories (and files, unless --file-sort is given)
    #[arg(short, long, value_enum, default_value = "name")]
    sort: SortArg,

    /// Sort key for files
    #[arg(long = "file-sort", value_enum)]
    file_sort: Option<SortArg>,

    /// Reverse the sort order
    #[arg(long)]
    reverse: bool,

    /// Ignore entries matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Leave out entries whose names start with a dot
    #[arg(long = "no-hidden")]
    no_hidden: bool,
}

impl OrderArgs {
    fn ordering(&self) -> PathOrdering {
        let ordering = PathOrdering::new(self.sort.key(self.reverse));
        match self.file_sort {
            Some(key) => ordering.with_file_key(key.key(self.reverse)),
            None => ordering,
        }
    }

    fn config(&self) -> WalkerConfig {
        WalkerConfig {
            ignore_patterns: self.ignore.clone(),
            show_hidden: !self.no_hidden,
            ..Default::default()
        }
    }
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// Which siblings to select
    #[arg(long, value_enum, default_value = "all")]
    relation: RelationArg,

    /// Query files instead of directories
    #[arg(long)]
    files: bool,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

impl QueryArgs {
    fn kind(&self) -> EntryKind {
        if self.files {
            EntryKind::File
        } else {
            EntryKind::Directory
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Resolve PATH against the root when it is relative, so queries can name
/// entries relative to the tree rather than the working directory.
fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[derive(Debug)]
enum CliError {
    Walk(sortedwalk::Error),
    Output(io::Error),
}

impl From<sortedwalk::Error> for CliError {
    fn from(e: sortedwalk::Error) -> Self {
        CliError::Walk(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Output(e)
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Walk {
            path,
            order,
            level,
            full_paths,
            json,
            color,
        } => {
            let config = WalkerConfig {
                max_depth: level,
                ..order.config()
            };
            let walker = SortedWalker::with_config(&path, order.ordering(), config)?;

            if json {
                let mut stdout = io::stdout().lock();
                for step in walker {
                    write_json_line(&mut stdout, &step?)?;
                }
                return Ok(());
            }

            let output_config = OutputConfig {
                use_color: should_use_color(color),
                full_paths,
            };
            let choice = if output_config.use_color {
                ColorChoice::Auto
            } else {
                ColorChoice::Never
            };
            let mut stdout = StandardStream::stdout(choice);
            let mut formatter = LevelFormatter::new(output_config);
            for step in walker {
                formatter.write_level(&mut stdout, &step?)?;
            }
            formatter.write_summary(&mut stdout)?;
        }
        Command::Parent { path, scope } => {
            let relatives = Relatives::new(&scope.root, PathOrdering::default())?;
            let parent = relatives.parent(&resolve(&scope.root, &path))?;
            writeln!(io::stdout(), "{}", parent.display())?;
        }
        Command::Siblings {
            path,
            scope,
            order,
            query,
        } => {
            let relatives = Relatives::with_config(&scope.root, order.ordering(), &order.config())?;
            let siblings = relatives.siblings(
                &resolve(&scope.root, &path),
                query.relation.into(),
                query.kind(),
            )?;
            if query.json {
                print_json(&siblings)?;
            } else {
                write_paths(&mut io::stdout().lock(), &siblings)?;
            }
        }
        Command::Cousins {
            path,
            scope,
            order,
            query,
            flat,
        } => {
            let relatives = Relatives::with_config(&scope.root, order.ordering(), &order.config())?;
            let path = resolve(&scope.root, &path);
            let relation = query.relation.into();
            let mut stdout = io::stdout().lock();
            if flat {
                let cousins = relatives.cousins_flat(&path, relation, query.kind())?;
                if query.json {
                    print_json(&cousins)?;
                } else {
                    write_paths(&mut stdout, &cousins)?;
                }
            } else {
                let cousins = relatives.cousins(&path, relation, query.kind())?;
                if query.json {
                    print_json(&cousins)?;
                } else {
                    write_groups(&mut stdout, &cousins)?;
                }
            }
        }
        Command::Common { paths } => {
            writeln!(io::stdout(), "{}", common_parent(paths.as_slice())?)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => {}
        // Closed pipe (e.g. `| head`) is not an error
        Err(CliError::Output(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(CliError::Output(e)) => {
            eprintln!("sortedwalk: error writing output: {}", e);
            process::exit(1);
        }
        Err(CliError::Walk(e)) => {
            eprintln!("sortedwalk: {}", e);
            process::exit(1);
        }
    }
}
