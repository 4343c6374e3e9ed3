//! Record fixtures for unit tests.

use crate::types::{Goal, GoalRef, Id, Person, Project, ProjectStatus, Space};

pub(crate) fn space(id: &str, name: &str) -> Space {
    Space {
        id: Id::from(id),
        name: name.to_string(),
        is_company_space: false,
    }
}

pub(crate) fn person(id: &str, full_name: &str) -> Person {
    Person {
        id: Id::from(id),
        full_name: full_name.to_string(),
    }
}

/// An open, parentless goal in the default space.
pub(crate) fn goal(id: &str, name: &str) -> Goal {
    Goal {
        id: Id::from(id),
        name: name.to_string(),
        parent_goal_id: None,
        champion: None,
        reviewer: None,
        is_closed: false,
        progress_percentage: None,
        timeframe: None,
        space: space("space-default", "General"),
        last_check_in: None,
    }
}

pub(crate) fn child_goal(id: &str, name: &str, parent: &str) -> Goal {
    Goal {
        parent_goal_id: Some(Id::from(parent)),
        ..goal(id, name)
    }
}

/// An unattached project with no milestones.
pub(crate) fn project(id: &str, name: &str, status: ProjectStatus) -> Project {
    Project {
        id: Id::from(id),
        name: name.to_string(),
        goal: None,
        champion: None,
        reviewer: None,
        status: Some(status),
        space: space("space-default", "General"),
        milestones: Vec::new(),
        started_at: None,
        closed_at: None,
        deadline: None,
        last_check_in: None,
        retrospective: None,
    }
}

pub(crate) fn child_project(id: &str, name: &str, status: ProjectStatus, goal: &str) -> Project {
    Project {
        goal: Some(GoalRef {
            id: Id::from(goal),
            name: None,
        }),
        ..project(id, name, status)
    }
}
