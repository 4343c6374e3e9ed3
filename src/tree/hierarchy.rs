//! The wired parent/child graph a build works from.
//!
//! [`Hierarchy::connect`] indexes nodes by id once, resolves every parent
//! reference through that index and refuses duplicate ids and cycles. The
//! result is immutable: filtering and sorting read from it and produce new
//! structures instead of editing it.

use std::collections::HashMap;

use crate::error::{GoalTreeError, Result};
use crate::tree::node::Node;
use crate::types::Id;

/// Which statuses occur somewhere below a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescendantStatus {
    pub active: bool,
    pub paused: bool,
    pub closed: bool,
}

impl DescendantStatus {
    fn of(node: &Node) -> Self {
        Self {
            active: node.is_active(),
            paused: node.is_paused(),
            closed: node.is_closed(),
        }
    }

    fn merge(&mut self, other: Self) {
        self.active |= other.active;
        self.paused |= other.paused;
        self.closed |= other.closed;
    }
}

/// Arena of nodes plus index-based parent and child links.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<Node>,
    index: HashMap<Id, usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    /// Pre-order over the whole forest; parents precede their children.
    order: Vec<usize>,
    below: Vec<DescendantStatus>,
    orphans: usize,
}

impl Hierarchy {
    /// Wire `nodes` together by id.
    ///
    /// Parent references that match no node leave the node parentless.
    /// Children keep input order. Each resolved node gets its `parent`
    /// field set to the parent's id.
    pub fn connect(mut nodes: Vec<Node>) -> Result<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(GoalTreeError::DuplicateId(node.id.to_string()));
            }
        }

        let mut parents = vec![None; nodes.len()];
        let mut children = vec![Vec::new(); nodes.len()];
        let mut orphans = 0;
        for (i, node) in nodes.iter().enumerate() {
            let Some(parent_id) = &node.parent_id else {
                continue;
            };
            match index.get(parent_id) {
                Some(&p) => {
                    parents[i] = Some(p);
                    children[p].push(i);
                }
                None => orphans += 1,
            }
        }

        if let Some(cycle) = find_cycle(&parents) {
            let mut node_ids: Vec<String> = cycle.iter().map(|&i| nodes[i].id.to_string()).collect();
            node_ids.push(nodes[cycle[0]].id.to_string());
            return Err(GoalTreeError::CyclicParent { node_ids });
        }

        for (i, parent) in parents.iter().enumerate() {
            if let Some(p) = *parent {
                let parent_id = nodes[p].id.clone();
                nodes[i].parent = Some(parent_id);
            }
        }

        let order = pre_order(&parents, &children);
        let below = descendant_statuses(&nodes, &parents, &order, |_| true);

        Ok(Self {
            nodes,
            index,
            parents,
            children,
            order,
            below,
            orphans,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn index_of(&self, id: &Id) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn parent_of(&self, idx: usize) -> Option<usize> {
        self.parents[idx]
    }

    pub fn children_of(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }

    /// Nodes whose parent reference named an id not in this build.
    pub fn orphan_count(&self) -> usize {
        self.orphans
    }

    /// Indices of every node without a resolved parent, in input order.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(move |&i| self.parents[i].is_none())
    }

    /// Walk from the parent of `idx` up to its root.
    pub fn ancestors(&self, idx: usize) -> Ancestors<'_> {
        Ancestors {
            hierarchy: self,
            next: self.parents[idx],
        }
    }

    /// Walk every node below `idx`, pre-order.
    pub fn descendants(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        let mut stack: Vec<usize> = self.children[idx].iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.children[next].iter().rev().copied());
            Some(next)
        })
    }

    // -------------------------------------------------------------------
    // Structural predicates
    // -------------------------------------------------------------------

    pub fn has_no_parent(&self, idx: usize) -> bool {
        self.parents[idx].is_none()
    }

    /// True when no ancestor of `idx` (self excluded) satisfies `predicate`.
    pub fn has_no_parent_with(&self, idx: usize, predicate: impl Fn(&Node) -> bool) -> bool {
        !self.ancestors(idx).any(|a| predicate(&self.nodes[a]))
    }

    pub fn is_from_space(&self, idx: usize, space_id: &Id) -> bool {
        self.nodes[idx].is_from_space(space_id)
    }

    pub fn has_descendant_from_space(&self, idx: usize, space_id: &Id) -> bool {
        self.descendants(idx)
            .any(|d| self.nodes[d].is_from_space(space_id))
    }

    pub fn has_ancestor_from_space(&self, idx: usize, space_id: &Id) -> bool {
        !self.has_no_parent_with(idx, |n| n.is_from_space(space_id))
    }

    /// Per node: in `space_id`, or with a descendant or an ancestor there.
    /// Two linear passes instead of a walk per node.
    pub fn space_relatives(&self, space_id: &Id) -> Vec<bool> {
        let own: Vec<bool> = self.nodes.iter().map(|n| n.is_from_space(space_id)).collect();

        let mut below = vec![false; self.nodes.len()];
        for &i in self.order.iter().rev() {
            if let Some(p) = self.parents[i] {
                below[p] |= own[i] || below[i];
            }
        }
        let mut above = vec![false; self.nodes.len()];
        for &i in &self.order {
            if let Some(p) = self.parents[i] {
                above[i] = own[p] || above[p];
            }
        }

        (0..self.nodes.len())
            .map(|i| own[i] || below[i] || above[i])
            .collect()
    }

    /// Statuses below every node, counting only descendants accepted by `keep`.
    pub fn descendant_statuses_where(&self, keep: impl Fn(usize) -> bool) -> Vec<DescendantStatus> {
        descendant_statuses(&self.nodes, &self.parents, &self.order, keep)
    }

    pub fn descendant_status(&self, idx: usize) -> DescendantStatus {
        self.below[idx]
    }

    pub fn has_active_descendant(&self, idx: usize) -> bool {
        self.below[idx].active
    }

    pub fn has_paused_descendant(&self, idx: usize) -> bool {
        self.below[idx].paused
    }

    pub fn has_closed_descendant(&self, idx: usize) -> bool {
        self.below[idx].closed
    }
}

/// Iterator returned by [`Hierarchy::ancestors`].
pub struct Ancestors<'a> {
    hierarchy: &'a Hierarchy,
    next: Option<usize>,
}

impl Iterator for Ancestors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        self.next = self.hierarchy.parents[current];
        Some(current)
    }
}

// ---------------------------------------------------------------------------
// Cycle detection
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath,
    Done,
}

/// Follow every parent chain once. A chain that reaches a node already on
/// the current path is a cycle; the returned indices run child to parent.
fn find_cycle(parents: &[Option<usize>]) -> Option<Vec<usize>> {
    let mut state = vec![Visit::New; parents.len()];

    for start in 0..parents.len() {
        if state[start] != Visit::New {
            continue;
        }
        let mut path = Vec::new();
        let mut current = Some(start);
        while let Some(i) = current {
            match state[i] {
                Visit::Done => break,
                Visit::OnPath => {
                    let from = path.iter().position(|&p| p == i).unwrap_or(0);
                    return Some(path[from..].to_vec());
                }
                Visit::New => {
                    state[i] = Visit::OnPath;
                    path.push(i);
                    current = parents[i];
                }
            }
        }
        for i in path {
            state[i] = Visit::Done;
        }
    }
    None
}

/// Every node, parents before children. Only valid once cycles are ruled out.
fn pre_order(parents: &[Option<usize>], children: &[Vec<usize>]) -> Vec<usize> {
    let mut order = Vec::with_capacity(parents.len());
    let mut stack: Vec<usize> = (0..parents.len()).filter(|&i| parents[i].is_none()).collect();
    while let Some(i) = stack.pop() {
        order.push(i);
        stack.extend(children[i].iter().copied());
    }
    order
}

/// Fold statuses bottom-up. Reverse pre-order visits children before parents.
fn descendant_statuses(
    nodes: &[Node],
    parents: &[Option<usize>],
    order: &[usize],
    keep: impl Fn(usize) -> bool,
) -> Vec<DescendantStatus> {
    let mut below = vec![DescendantStatus::default(); nodes.len()];
    for &i in order.iter().rev() {
        if let Some(p) = parents[i] {
            let mut carried = below[i];
            if keep(i) {
                carried.merge(DescendantStatus::of(&nodes[i]));
            }
            below[p].merge(carried);
        }
    }
    below
}
