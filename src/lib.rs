//! sortedwalk - breadth-first directory walking in a caller-defined sort order,
//! with sibling and cousin queries positioned by the same order

pub mod common;
pub mod error;
pub mod listing;
pub mod ordering;
pub mod output;
pub mod paths;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use common::{IndexSearch, common_parent};
pub use error::{Conflict, Error, Result};
pub use listing::{EntryKind, exists_as_directory, list_directory_entries};
pub use ordering::{PathOrdering, SortKey};
pub use output::{LevelFormatter, OutputConfig, print_json};
pub use tree::{Level, Relation, Relatives, SortedWalker, WalkerConfig};
