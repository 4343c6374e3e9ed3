//! Error types for goaltree.
//!
//! Two families: caller bugs (bad options, rejected before any node is
//! built) and bad data (records that cannot form a consistent tree).
//! Orphaned parent references are neither and never surface here.

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GoalTreeError>;

/// Every failure a tree build or options load can produce.
#[derive(Debug, thiserror::Error)]
pub enum GoalTreeError {
    /// An option value is malformed (e.g. an unknown sort direction).
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// The requested sort column does not exist.
    #[error("Unknown sort column: {0}")]
    UnknownSortColumn(String),

    /// More than one scope selector was supplied.
    #[error("Conflicting scope selectors: {0}")]
    ConflictingScope(String),

    /// A project record arrived without a status.
    #[error("Project {project_id} has no status")]
    MissingProjectStatus { project_id: String },

    /// Two records share the same identifier.
    #[error("Duplicate identifier: {0}")]
    DuplicateId(String),

    /// Parent references loop back on themselves.
    #[error("Cyclic parent references: {}", node_ids.join(" -> "))]
    CyclicParent { node_ids: Vec<String> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GoalTreeError {
    /// True for errors caused by the caller's options rather than the data.
    pub fn is_option_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidOption(_) | Self::UnknownSortColumn(_) | Self::ConflictingScope(_)
        )
    }
}
