//! Assemble goal and project records into a sorted, depth-annotated forest.
//!
//! Pipeline: create nodes → connect by id → select roots for the scope →
//! filter → copy out with depths → sort every level. Sorting only reorders
//! siblings, so depth and membership are fixed once filtering is done.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::{TreeOptions, TreeScope};
use crate::error::Result;
use crate::tree::filter::{Branch, TreeFilter};
use crate::tree::hierarchy::Hierarchy;
use crate::tree::node::Node;
use crate::tree::sort::sort_forest;
use crate::types::{Goal, Id, Project};

// ---------------------------------------------------------------------------
// BuildStats
// ---------------------------------------------------------------------------

/// Counters describing one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub goals: usize,
    pub projects: usize,
    /// Records whose parent reference did not resolve.
    pub orphans: usize,
    pub candidate_roots: usize,
    pub roots: usize,
    pub nodes: usize,
    /// Nodes in the candidate subtrees that the filter removed.
    pub pruned: usize,
    pub duration_ms: u64,
}

impl BuildStats {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// ---------------------------------------------------------------------------
// TreeBuilder
// ---------------------------------------------------------------------------

/// Builds forests for one set of options. Holds no state between builds.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    options: TreeOptions,
}

impl TreeBuilder {
    pub fn new(options: TreeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    pub fn build(&self, goals: &[Goal], projects: &[Project]) -> Result<Vec<Node>> {
        self.build_with_stats(goals, projects).map(|(forest, _)| forest)
    }

    pub fn build_with_stats(
        &self,
        goals: &[Goal],
        projects: &[Project],
    ) -> Result<(Vec<Node>, BuildStats)> {
        let started = Instant::now();
        self.options.validate()?;

        let nodes = create_nodes(goals, projects)?;
        let hierarchy = Hierarchy::connect(nodes)?;
        if hierarchy.orphan_count() > 0 {
            tracing::warn!(
                orphans = hierarchy.orphan_count(),
                "parent references without a matching record treated as roots"
            );
        }

        let roots = self.select_roots(&hierarchy);
        let candidates: usize = roots
            .iter()
            .map(|&r| 1 + hierarchy.descendants(r).count())
            .sum();

        let branches = TreeFilter::new(&hierarchy, &self.options).apply(&roots);
        let mut forest: Vec<Node> = branches
            .into_iter()
            .map(|b| materialize(&hierarchy, b, 0))
            .collect();
        sort_forest(
            &mut forest,
            self.options.sort_column,
            self.options.sort_direction,
        );

        let nodes = crate::tree::node::count_nodes(&forest);
        let stats = BuildStats {
            goals: goals.len(),
            projects: projects.len(),
            orphans: hierarchy.orphan_count(),
            candidate_roots: roots.len(),
            roots: forest.len(),
            nodes,
            pruned: candidates.saturating_sub(nodes),
            duration_ms: whole_millis(started.elapsed()),
        };
        tracing::debug!(
            scope = self.options.scope.name(),
            sort = %self.options.sort_column,
            direction = %self.options.sort_direction,
            candidate_roots = stats.candidate_roots,
            roots = stats.roots,
            nodes = stats.nodes,
            pruned = stats.pruned,
            "built tree"
        );
        Ok((forest, stats))
    }

    // -------------------------------------------------------------------
    // Root selection
    // -------------------------------------------------------------------

    fn select_roots(&self, h: &Hierarchy) -> Vec<usize> {
        let all = 0..h.len();
        match &self.options.scope {
            TreeScope::Company => h.roots().collect(),
            TreeScope::Space { space_id } => h
                .roots()
                .filter(|&i| h.is_from_space(i, space_id) || h.has_descendant_from_space(i, space_id))
                .collect(),
            TreeScope::Person { champion, reviewer } => {
                let matches = |node: &Node| {
                    person_matches(node.champion.as_ref().map(|p| &p.id), champion.as_ref())
                        || person_matches(node.reviewer.as_ref().map(|p| &p.id), reviewer.as_ref())
                };
                all.filter(|&i| matches(h.node(i)) && h.has_no_parent_with(i, matches))
                    .collect()
            }
            TreeScope::Goal { goal_id } => all
                .filter(|&i| h.node(i).parent_id.as_ref() == Some(goal_id))
                .collect(),
        }
    }

}

/// Milliseconds, saturating at `u64::MAX`.
fn whole_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn person_matches(candidate: Option<&Id>, target: Option<&Id>) -> bool {
    matches!((candidate, target), (Some(c), Some(t)) if c == t)
}

/// Goals first, then projects, each in input order.
fn create_nodes(goals: &[Goal], projects: &[Project]) -> Result<Vec<Node>> {
    let mut nodes = Vec::with_capacity(goals.len() + projects.len());
    nodes.extend(goals.iter().cloned().map(Node::from_goal));
    for project in projects {
        nodes.push(Node::from_project(project.clone())?);
    }
    Ok(nodes)
}

/// Copy a branch out of the hierarchy with depths filled in.
fn materialize(h: &Hierarchy, branch: Branch, depth: u32) -> Node {
    let mut node = h.node(branch.idx).clone();
    node.depth = depth;
    node.children = branch
        .children
        .into_iter()
        .map(|child| materialize(h, child, depth + 1))
        .collect();
    node
}

/// Build a forest in one call.
pub fn build_tree(goals: &[Goal], projects: &[Project], options: &TreeOptions) -> Result<Vec<Node>> {
    TreeBuilder::new(options.clone()).build(goals, projects)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
