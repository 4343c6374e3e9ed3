//! Project-specific node behavior: milestone progress, deadlines and the
//! active timeframe.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::node::{Node, NodeRecord, NodeStatus};
use super::sort::compare_optional;
use crate::error::{GoalTreeError, Result};
use crate::types::{CheckIn, MilestoneStatus, Project, ProjectStatus, Retrospective};

impl Node {
    /// Build a parentless, childless node from a project record.
    ///
    /// Fails when the record has no status: it drives both filtering and
    /// ordering, so there is no safe default.
    pub fn from_project(project: Project) -> Result<Node> {
        let status = match project.status {
            Some(ProjectStatus::Active) => NodeStatus::Active,
            Some(ProjectStatus::Paused) => NodeStatus::Paused,
            Some(ProjectStatus::Closed) => NodeStatus::Closed,
            None => {
                return Err(GoalTreeError::MissingProjectStatus {
                    project_id: project.id.to_string(),
                })
            }
        };

        Ok(Node {
            id: project.id.clone(),
            parent_id: project.goal.as_ref().map(|g| g.id.clone()),
            parent: None,
            name: project.name.clone(),
            depth: 0,
            champion: project.champion.clone(),
            reviewer: project.reviewer.clone(),
            space: project.space.clone(),
            status,
            progress: milestone_progress(&project),
            last_check_in_date: project.last_check_in.as_ref().map(|c| c.inserted_at),
            record: NodeRecord::Project(Box::new(project)),
            children: Vec::new(),
        })
    }

    pub fn last_check_in(&self) -> Option<&CheckIn> {
        self.as_project().and_then(|p| p.last_check_in.as_ref())
    }

    pub fn retrospective(&self) -> Option<&Retrospective> {
        self.as_project().and_then(|p| p.retrospective.as_ref())
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.as_project().and_then(|p| p.started_at)
    }

    /// Span the project has been running, ending now.
    pub fn active_timeframe(&self) -> Option<ActiveTimeframe> {
        self.active_timeframe_at(Utc::now())
    }

    /// Span the project has been running, as seen at `now`.
    ///
    /// Open projects end at `now`; closed ones at their close date, or the
    /// retrospective's when the record has none. `None` for goals and for
    /// projects that never started.
    pub fn active_timeframe_at(&self, now: DateTime<Utc>) -> Option<ActiveTimeframe> {
        let project = self.as_project()?;
        let start = project.started_at?;
        let end = if self.is_closed() {
            project
                .closed_at
                .or_else(|| project.retrospective.as_ref().and_then(|r| r.closed_at))?
        } else {
            now
        };
        Some(ActiveTimeframe { start, end })
    }
}

/// Start and end of a project's active period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveTimeframe {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ActiveTimeframe {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Done milestones over all milestones, as a percentage. 0 when there are none.
fn milestone_progress(project: &Project) -> f64 {
    let total = project.milestones.len();
    if total == 0 {
        return 0.0;
    }
    let done = project
        .milestones
        .iter()
        .filter(|m| m.status == MilestoneStatus::Done)
        .count();
    done as f64 / total as f64 * 100.0
}

/// Deadlines ascending; projects without one go last.
pub(crate) fn compare_timeframe(a: &Project, b: &Project) -> Ordering {
    compare_optional(a.deadline, b.deadline)
}
