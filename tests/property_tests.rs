//! Property-based tests for goaltree using proptest.
//!
//! These tests verify invariants that must hold for all possible inputs,
//! finding edge cases that unit tests might miss.

use proptest::prelude::*;

use goaltree::config::{SortColumn, SortDirection, TreeOptions, TreeScope};
use goaltree::tree::node::{count_nodes, walk};
use goaltree::types::{Goal, GoalRef, Id, Person, Project, ProjectStatus, Space};
use goaltree::{build_tree, Node};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_sort_column() -> impl Strategy<Value = SortColumn> {
    prop_oneof![
        Just(SortColumn::Name),
        Just(SortColumn::Timeframe),
        Just(SortColumn::LastCheckIn),
        Just(SortColumn::Champion),
        Just(SortColumn::Space),
        Just(SortColumn::Progress),
    ]
}

fn arb_direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)]
}

fn arb_project_status() -> impl Strategy<Value = ProjectStatus> {
    prop_oneof![
        Just(ProjectStatus::Active),
        Just(ProjectStatus::Paused),
        Just(ProjectStatus::Closed),
    ]
}

fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z][a-z]{0,8}".prop_map(|s| s)
}

/// Per-goal: name, closed flag, progress, champion, parent selector.
type GoalSeed = (String, bool, f64, Option<u8>, Option<usize>);
/// Per-project: name, status, parent selector.
type ProjectSeed = (String, ProjectStatus, Option<usize>);

/// An acyclic set of records: goal `i` may only point at a goal `< i`,
/// so every parent chain terminates.
fn arb_records() -> impl Strategy<Value = (Vec<Goal>, Vec<Project>)> {
    let goal_seeds = prop::collection::vec(
        (
            arb_name(),
            any::<bool>(),
            0.0f64..100.0,
            prop::option::of(0u8..3),
            prop::option::of(any::<usize>()),
        ),
        1..25,
    );
    let project_seeds = prop::collection::vec(
        (
            arb_name(),
            arb_project_status(),
            prop::option::of(any::<usize>()),
        ),
        0..25,
    );
    (goal_seeds, project_seeds).prop_map(|(goals, projects)| {
        let goals: Vec<Goal> = goals
            .into_iter()
            .enumerate()
            .map(|(i, seed)| make_goal(i, seed))
            .collect();
        let goal_count = goals.len();
        let projects = projects
            .into_iter()
            .enumerate()
            .map(|(i, seed)| make_project(i, seed, goal_count))
            .collect();
        (goals, projects)
    })
}

fn make_goal(i: usize, (name, closed, progress, champion, parent): GoalSeed) -> Goal {
    Goal {
        id: Id::from(format!("g{i}")),
        name,
        parent_goal_id: parent
            .filter(|_| i > 0)
            .map(|p| Id::from(format!("g{}", p % i))),
        champion: champion.map(|c| Person {
            id: Id::from(format!("person{c}")),
            full_name: format!("Person {c}"),
        }),
        reviewer: None,
        is_closed: closed,
        progress_percentage: Some(progress),
        timeframe: None,
        space: Space {
            id: Id::from(format!("s{}", i % 3)),
            name: format!("Space {}", i % 3),
            is_company_space: i % 3 == 0,
        },
        last_check_in: None,
    }
}

fn make_project(i: usize, (name, status, parent): ProjectSeed, goal_count: usize) -> Project {
    Project {
        id: Id::from(format!("p{i}")),
        name,
        goal: parent.map(|p| GoalRef {
            id: Id::from(format!("g{}", p % goal_count)),
            name: None,
        }),
        champion: None,
        reviewer: None,
        status: Some(status),
        space: Space {
            id: Id::from("s1"),
            name: "Space 1".to_string(),
            is_company_space: false,
        },
        milestones: Vec::new(),
        started_at: None,
        closed_at: None,
        deadline: None,
        last_check_in: None,
        retrospective: None,
    }
}

fn check_depths(node: &Node, expected: u32) -> bool {
    node.depth == expected && node.children.iter().all(|c| check_depths(c, expected + 1))
}

fn siblings_ordered(nodes: &[Node]) -> bool {
    let pairs_ok = nodes.windows(2).all(|w| {
        let (a, b) = (&w[0], &w[1]);
        if a.node_type() != b.node_type() {
            return a.is_goal();
        }
        if a.is_closed() != b.is_closed() {
            return !a.is_closed();
        }
        true
    });
    pairs_ok && nodes.iter().all(|n| siblings_ordered(&n.children))
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn depth_is_consistent(
        (goals, projects) in arb_records(),
        column in arb_sort_column(),
        direction in arb_direction()
    ) {
        let options = TreeOptions::default()
            .sorted_by(column, direction)
            .showing(true, true, true);
        let forest = build_tree(&goals, &projects, &options).unwrap();
        for root in &forest {
            prop_assert!(check_depths(root, 0));
        }
    }

    #[test]
    fn every_record_appears_once_when_all_statuses_shown(
        (goals, projects) in arb_records()
    ) {
        let options = TreeOptions::default().showing(true, true, true);
        let forest = build_tree(&goals, &projects, &options).unwrap();
        prop_assert_eq!(count_nodes(&forest), goals.len() + projects.len());

        let mut seen: Vec<&str> = walk(&forest).map(|n| n.id.as_str()).collect();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), goals.len() + projects.len());
    }

    #[test]
    fn goals_first_and_closed_last_among_siblings(
        (goals, projects) in arb_records(),
        column in arb_sort_column(),
        direction in arb_direction()
    ) {
        let options = TreeOptions::default()
            .sorted_by(column, direction)
            .showing(true, true, true);
        let forest = build_tree(&goals, &projects, &options).unwrap();
        prop_assert!(siblings_ordered(&forest));
    }

    #[test]
    fn filtered_nodes_match_status_rule(
        (goals, projects) in arb_records(),
        active in any::<bool>(),
        paused in any::<bool>(),
        completed in any::<bool>()
    ) {
        let options = TreeOptions::default().showing(active, paused, completed);
        let forest = build_tree(&goals, &projects, &options).unwrap();
        for node in walk(&forest) {
            let visible = (active && (node.is_active() || node.has_active_descendant()))
                || (paused && (node.is_paused() || node.has_paused_descendant()))
                || (completed && (node.is_closed() || node.has_closed_descendant()));
            // Survivors keep at least one matching node at or below them,
            // and pruning never strips that match away.
            prop_assert!(visible, "node {} should have been pruned", node.id);
        }
    }

    #[test]
    fn space_scoped_nodes_match_status_rule(
        (goals, projects) in arb_records(),
        space in 0usize..3,
        active in any::<bool>(),
        paused in any::<bool>(),
        completed in any::<bool>()
    ) {
        let options = TreeOptions::default()
            .showing(active, paused, completed)
            .with_scope(TreeScope::Space { space_id: Id::from(format!("s{space}")) });
        let forest = build_tree(&goals, &projects, &options).unwrap();
        for node in walk(&forest) {
            let visible = (active && (node.is_active() || node.has_active_descendant()))
                || (paused && (node.is_paused() || node.has_paused_descendant()))
                || (completed && (node.is_closed() || node.has_closed_descendant()));
            prop_assert!(visible, "node {} kept without matching work", node.id);
        }
    }

    #[test]
    fn build_is_deterministic(
        (goals, projects) in arb_records(),
        column in arb_sort_column(),
        direction in arb_direction()
    ) {
        let options = TreeOptions::default()
            .sorted_by(column, direction)
            .showing(true, true, true);
        let first = build_tree(&goals, &projects, &options).unwrap();
        let second = build_tree(&goals, &projects, &options).unwrap();
        prop_assert_eq!(first, second);
    }
}
