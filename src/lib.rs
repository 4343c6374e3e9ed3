//! goaltree: hierarchical goal/project tree builder.
//!
//! Turns flat goal and project records into a filtered, sorted,
//! depth-annotated forest ready for an outline view.

pub mod config;
pub mod error;
pub mod observability;
pub mod tree;
pub mod types;

pub use config::{SortColumn, SortDirection, TreeConfig, TreeOptions, TreeScope};
pub use error::{GoalTreeError, Result};
pub use tree::{build_tree, BuildStats, Node, TreeBuilder};
