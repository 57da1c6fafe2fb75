//! Configuration types for tree walkers

/// Configuration for walking and listing behavior.
///
/// Filters apply to every listing, so relationship queries see the same
/// entries the walker does.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Directories at this depth are emitted but not descended into (root is depth 0)
    pub max_depth: Option<usize>,
    /// Glob patterns matched against entry names; matches are left out of listings
    pub ignore_patterns: Vec<String>,
    pub show_hidden: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            ignore_patterns: Vec::new(),
            show_hidden: true,
        }
    }
}
