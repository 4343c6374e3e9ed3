//! The node type shared by goals and projects.
//!
//! A [`Node`] holds the fields every hierarchy member has, plus the full
//! source record in [`NodeRecord`]. Variant-specific behavior lives in
//! `goal.rs` and `project.rs` and is reached by matching on the record.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{SortColumn, SortDirection};
use crate::tree::sort;
use crate::types::{Goal, Id, Person, Project, Space};

// ---------------------------------------------------------------------------
// NodeType
// ---------------------------------------------------------------------------

/// Discriminant of a node. Goals always sort before projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    Goal,
    Project,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Project => "project",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NodeStatus
// ---------------------------------------------------------------------------

/// Exactly one of active, paused or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Active,
    Paused,
    Closed,
}

// ---------------------------------------------------------------------------
// NodeRecord
// ---------------------------------------------------------------------------

/// The source record a node was created from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeRecord {
    Goal(Box<Goal>),
    Project(Box<Project>),
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// One member of a built forest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: Id,
    /// Parent reference exactly as the record carried it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Id>,
    /// Parent that actually resolved during wiring. `None` for orphans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Id>,
    pub name: String,
    pub depth: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub champion: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<Person>,
    pub space: Space,
    pub status: NodeStatus,
    /// Percentage in `[0, 100]`, never NaN.
    pub progress: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_check_in_date: Option<DateTime<Utc>>,
    pub record: NodeRecord,
    pub children: Vec<Node>,
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self.record {
            NodeRecord::Goal(_) => NodeType::Goal,
            NodeRecord::Project(_) => NodeType::Project,
        }
    }

    pub fn is_goal(&self) -> bool {
        self.node_type() == NodeType::Goal
    }

    pub fn is_project(&self) -> bool {
        self.node_type() == NodeType::Project
    }

    pub fn as_goal(&self) -> Option<&Goal> {
        match &self.record {
            NodeRecord::Goal(goal) => Some(goal),
            NodeRecord::Project(_) => None,
        }
    }

    pub fn as_project(&self) -> Option<&Project> {
        match &self.record {
            NodeRecord::Project(project) => Some(project),
            NodeRecord::Goal(_) => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == NodeStatus::Active
    }

    pub fn is_paused(&self) -> bool {
        self.status == NodeStatus::Paused
    }

    pub fn is_closed(&self) -> bool {
        self.status == NodeStatus::Closed
    }

    /// True when no parent resolved during wiring.
    pub fn has_no_parent(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_from_space(&self, space_id: &Id) -> bool {
        self.space.id == *space_id
    }

    // -------------------------------------------------------------------
    // Descendant queries over the built tree
    // -------------------------------------------------------------------

    /// Depth-first, pre-order walk over every descendant (not self).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    pub fn has_descendant_from_space(&self, space_id: &Id) -> bool {
        self.descendants().any(|n| n.is_from_space(space_id))
    }

    pub fn has_active_descendant(&self) -> bool {
        self.descendants().any(Node::is_active)
    }

    pub fn has_paused_descendant(&self) -> bool {
        self.descendants().any(Node::is_paused)
    }

    pub fn has_closed_descendant(&self) -> bool {
        self.descendants().any(Node::is_closed)
    }

    /// Number of nodes in this subtree, self included.
    pub fn count_nodes(&self) -> usize {
        1 + self.descendants().count()
    }

    // -------------------------------------------------------------------
    // Links
    // -------------------------------------------------------------------

    pub fn link_path(&self) -> String {
        match &self.record {
            NodeRecord::Goal(_) => format!("/goals/{}", self.id),
            NodeRecord::Project(_) => format!("/projects/{}", self.id),
        }
    }

    pub fn space_link_path(&self) -> String {
        format!("/spaces/{}", self.space.id)
    }

    // -------------------------------------------------------------------
    // Ordering
    // -------------------------------------------------------------------

    /// Total order used between siblings.
    ///
    /// Goals precede projects, then open precede closed, then the column
    /// comparison oriented by `direction`. Only the column step is
    /// affected by `direction`.
    pub fn compare(&self, other: &Node, column: SortColumn, direction: SortDirection) -> Ordering {
        self.node_type()
            .cmp(&other.node_type())
            .then_with(|| self.is_closed().cmp(&other.is_closed()))
            .then_with(|| direction.apply(sort::compare_column(self, other, column)))
    }

    /// Timeframe comparison: goal end dates or project deadlines,
    /// ascending, missing dates last. Mixed types compare equal.
    pub fn compare_timeframe(&self, other: &Node) -> Ordering {
        match (&self.record, &other.record) {
            (NodeRecord::Goal(a), NodeRecord::Goal(b)) => super::goal::compare_timeframe(a, b),
            (NodeRecord::Project(a), NodeRecord::Project(b)) => {
                super::project::compare_timeframe(a, b)
            }
            _ => Ordering::Equal,
        }
    }
}

/// Iterator returned by [`Node::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

// ---------------------------------------------------------------------------
// Forest helpers
// ---------------------------------------------------------------------------

/// Every node of a forest in display order.
pub fn walk(forest: &[Node]) -> impl Iterator<Item = &Node> {
    forest
        .iter()
        .flat_map(|root| std::iter::once(root).chain(root.descendants()))
}

/// Find a node by id anywhere in a forest.
pub fn find<'a>(forest: &'a [Node], id: &Id) -> Option<&'a Node> {
    walk(forest).find(|node| node.id == *id)
}

/// Total number of nodes in a forest.
pub fn count_nodes(forest: &[Node]) -> usize {
    forest.iter().map(Node::count_nodes).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
