// ABOUTME: Error types for layout construction and splitter dispatch.
// ABOUTME: Configuration errors carry the tree path of the offending group.

use crate::splitter::SplitterId;

/// A sibling group that cannot be allocated
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupError {
    #[error("only one sibling can have an auto size, found {count}")]
    MultipleAuto { count: usize },

    #[error("group has no siblings")]
    Empty,
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid {kind} group at {path}: {source}")]
    Group {
        kind: &'static str,
        path: String,
        #[source]
        source: GroupError,
    },

    #[error("Unknown splitter: {0}")]
    UnknownSplitter(SplitterId),

    #[error("Failed to read layout file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse layout: {0}")]
    Parse(#[from] toml::de::Error),
}
