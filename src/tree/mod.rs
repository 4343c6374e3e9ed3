//! Tree layer: node model, wiring, filtering, ordering and the builder.

pub mod builder;
pub mod filter;
pub mod goal;
pub mod hierarchy;
pub mod node;
pub mod project;
pub mod sort;
#[cfg(test)]
pub(crate) mod testing;

pub use builder::{build_tree, BuildStats, TreeBuilder};
pub use filter::TreeFilter;
pub use goal::ChildrenInfo;
pub use hierarchy::Hierarchy;
pub use node::{Node, NodeRecord, NodeStatus, NodeType};
pub use project::ActiveTimeframe;
