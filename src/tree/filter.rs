//! Visibility rules applied to the selected roots and everything below.
//!
//! Every predicate reads the pre-filter [`Hierarchy`], so whether a node
//! survives never depends on which of its relatives were pruned first. A
//! node that fails is dropped with its entire subtree; nothing is
//! re-parented.
//!
//! In a space-scoped build only descendants that pass the space rule count
//! towards a node's status. Otherwise a node could survive on the strength
//! of work that is itself pruned, and show up empty.

use crate::config::TreeOptions;
use crate::tree::hierarchy::{DescendantStatus, Hierarchy};

/// A surviving node and its surviving children, by hierarchy index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub idx: usize,
    pub children: Vec<Branch>,
}

impl Branch {
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Branch::count).sum::<usize>()
    }
}

/// Masks precomputed for a space-scoped build.
struct SpaceMask {
    relevant: Vec<bool>,
    below: Vec<DescendantStatus>,
}

pub struct TreeFilter<'a> {
    hierarchy: &'a Hierarchy,
    options: &'a TreeOptions,
    space: Option<SpaceMask>,
}

impl<'a> TreeFilter<'a> {
    pub fn new(hierarchy: &'a Hierarchy, options: &'a TreeOptions) -> Self {
        let space = options.scope.space_id().map(|space_id| {
            let relevant = hierarchy.space_relatives(space_id);
            let below = hierarchy.descendant_statuses_where(|i| relevant[i]);
            SpaceMask { relevant, below }
        });
        Self {
            hierarchy,
            options,
            space,
        }
    }

    /// Keep the visible roots and, recursively, their visible children.
    pub fn apply(&self, roots: &[usize]) -> Vec<Branch> {
        roots
            .iter()
            .filter(|&&idx| self.is_visible(idx))
            .map(|&idx| self.branch(idx))
            .collect()
    }

    fn branch(&self, idx: usize) -> Branch {
        Branch {
            idx,
            children: self.apply(self.hierarchy.children_of(idx)),
        }
    }

    pub fn is_visible(&self, idx: usize) -> bool {
        self.passes_space(idx) && self.passes_status(idx)
    }

    /// Only constrains space-scoped builds: the node is in the space, or
    /// has a descendant or an ancestor there.
    pub fn passes_space(&self, idx: usize) -> bool {
        self.space.as_ref().map_or(true, |mask| mask.relevant[idx])
    }

    /// Visible when an enabled status occurs on the node or below it.
    pub fn passes_status(&self, idx: usize) -> bool {
        let node = self.hierarchy.node(idx);
        let below = self.status_below(idx);
        (self.options.show_active && (node.is_active() || below.active))
            || (self.options.show_paused && (node.is_paused() || below.paused))
            || (self.options.show_completed && (node.is_closed() || below.closed))
    }

    fn status_below(&self, idx: usize) -> DescendantStatus {
        match &self.space {
            Some(mask) => mask.below[idx],
            None => self.hierarchy.descendant_status(idx),
        }
    }
}
