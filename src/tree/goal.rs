//! Goal-specific node behavior.

use std::cmp::Ordering;

use serde::Serialize;

use super::node::{Node, NodeRecord, NodeStatus};
use super::sort::compare_optional;
use crate::types::Goal;

impl Node {
    /// Build a parentless, childless node from a goal record.
    pub fn from_goal(goal: Goal) -> Node {
        let status = if goal.is_closed {
            NodeStatus::Closed
        } else {
            NodeStatus::Active
        };

        Node {
            id: goal.id.clone(),
            parent_id: goal.parent_goal_id.clone(),
            parent: None,
            name: goal.name.clone(),
            depth: 0,
            champion: goal.champion.clone(),
            reviewer: goal.reviewer.clone(),
            space: goal.space.clone(),
            status,
            progress: clamp_progress(goal.progress_percentage),
            last_check_in_date: goal.last_check_in.as_ref().map(|c| c.inserted_at),
            record: NodeRecord::Goal(Box::new(goal)),
            children: Vec::new(),
        }
    }

    /// Nested counts for a collapsed goal row. Projects report zero.
    pub fn children_info(&self) -> ChildrenInfo {
        match self.record {
            NodeRecord::Goal(_) => ChildrenInfo {
                goals: self.descendants().filter(|n| n.is_goal()).count(),
                projects: self.children.iter().filter(|n| n.is_project()).count(),
            },
            NodeRecord::Project(_) => ChildrenInfo::default(),
        }
    }

    /// e.g. `"2 subgoals, 1 project"`; empty when there is nothing to show.
    pub fn children_info_label(&self) -> String {
        self.children_info().label()
    }
}

/// Counts shown next to a collapsed goal: every goal below it and its
/// direct projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChildrenInfo {
    pub goals: usize,
    pub projects: usize,
}

impl ChildrenInfo {
    pub fn label(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if self.goals > 0 {
            parts.push(plural(self.goals, "subgoal"));
        }
        if self.projects > 0 {
            parts.push(plural(self.projects, "project"));
        }
        parts.join(", ")
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn clamp_progress(raw: Option<f64>) -> f64 {
    match raw {
        Some(value) if value.is_finite() => value.clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// End dates ascending; goals without a timeframe go last.
pub(crate) fn compare_timeframe(a: &Goal, b: &Goal) -> Ordering {
    compare_optional(
        a.timeframe.as_ref().map(|t| t.end_date),
        b.timeframe.as_ref().map(|t| t.end_date),
    )
}
