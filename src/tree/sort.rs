//! Column comparators used when ordering siblings.
//!
//! Every comparator here is ascending. [`Node::compare`] applies the
//! type and closed-state precedence and orients the result.

use std::cmp::Ordering;

use crate::config::{SortColumn, SortDirection};
use crate::tree::node::Node;

/// Ascending comparison of two nodes on one column.
pub fn compare_column(a: &Node, b: &Node, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Name => locale_compare(&a.name, &b.name),
        SortColumn::Timeframe => a.compare_timeframe(b),
        SortColumn::LastCheckIn => compare_optional(a.last_check_in_date, b.last_check_in_date),
        SortColumn::Champion => compare_optional_str(
            a.champion.as_ref().map(|p| p.full_name.as_str()),
            b.champion.as_ref().map(|p| p.full_name.as_str()),
        ),
        SortColumn::Space => b
            .space
            .is_company_space
            .cmp(&a.space.is_company_space)
            .then_with(|| locale_compare(&a.space.name, &b.space.name)),
        SortColumn::Progress => compare_progress(a, b),
    }
}

/// Sort siblings in place, stable for ties.
pub fn sort_siblings(nodes: &mut [Node], column: SortColumn, direction: SortDirection) {
    nodes.sort_by(|a, b| a.compare(b, column, direction));
}

/// Sort every level of a forest independently.
pub fn sort_forest(nodes: &mut [Node], column: SortColumn, direction: SortDirection) {
    sort_siblings(nodes, column, direction);
    for node in nodes.iter_mut() {
        sort_forest(&mut node.children, column, direction);
    }
}

/// Closed nodes tie with each other and trail open ones; open nodes
/// compare by progress.
fn compare_progress(a: &Node, b: &Node) -> Ordering {
    match (a.is_closed(), b.is_closed()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.progress.total_cmp(&b.progress),
    }
}

/// Case-insensitive comparison with a case-sensitive tie-break, so
/// `"alpha" < "Beta" < "beta"`.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

/// Present values ascending, missing values last.
pub fn compare_optional<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_optional_str(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => locale_compare(a, b),
        _ => compare_optional(a, b),
    }
}
