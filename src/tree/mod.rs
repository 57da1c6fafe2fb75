//! Ordered tree walking and relationship queries
//!
//! - `SortedWalker`: breadth-first iterator that yields each directory with
//!   its freshly sorted child directories and files
//! - `Relatives`: parent, sibling and cousin lookups positioned by the same
//!   sort order

mod config;
mod relations;
mod walker;

pub use config::WalkerConfig;
pub use relations::{Relation, Relatives};
pub use walker::{Level, SortedWalker};
