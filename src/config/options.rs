//! Validated build options: sort order, status toggles and scope.
//!
//! [`TreeOptions`] is what the builder consumes. It can only express one
//! scope at a time; the raw, file-facing form lives in
//! [`super::schema::TreeConfig`].

use crate::error::{GoalTreeError, Result};
use crate::types::Id;

// ---------------------------------------------------------------------------
// SortColumn
// ---------------------------------------------------------------------------

/// Column a forest is sorted by at every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Name,
    Timeframe,
    LastCheckIn,
    Champion,
    Space,
    Progress,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        Self::Name,
        Self::Timeframe,
        Self::LastCheckIn,
        Self::Champion,
        Self::Space,
        Self::Progress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Timeframe => "timeframe",
            Self::LastCheckIn => "last_check_in",
            Self::Champion => "champion",
            Self::Space => "space",
            Self::Progress => "progress",
        }
    }

    /// Parse from a loose string (case-insensitive; `-`, `_` and camelCase accepted).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "name" => Some(Self::Name),
            "timeframe" => Some(Self::Timeframe),
            "lastcheckin" => Some(Self::LastCheckIn),
            "champion" => Some(Self::Champion),
            "space" => Some(Self::Space),
            "progress" => Some(Self::Progress),
            _ => None,
        }
    }

    /// Strict parse used at the options boundary.
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str_loose(s).ok_or_else(|| GoalTreeError::UnknownSortColumn(s.to_string()))
    }
}

impl std::fmt::Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SortDirection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str_loose(s)
            .ok_or_else(|| GoalTreeError::InvalidOption(format!("unknown sort direction: {s}")))
    }

    /// Orient an ascending comparison result.
    pub fn apply(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TreeScope
// ---------------------------------------------------------------------------

/// Root-selection strategy for one build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TreeScope {
    /// Every parentless node is a root.
    #[default]
    Company,
    /// Parentless nodes that are in, or lead to, the given space.
    Space { space_id: Id },
    /// Topmost nodes championed by `champion` or reviewed by `reviewer`.
    Person {
        champion: Option<Id>,
        reviewer: Option<Id>,
    },
    /// The direct children of one goal.
    Goal { goal_id: Id },
}

impl TreeScope {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Space { .. } => "space",
            Self::Person { .. } => "person",
            Self::Goal { .. } => "goal",
        }
    }

    /// The target space, when this is a space scope.
    pub fn space_id(&self) -> Option<&Id> {
        match self {
            Self::Space { space_id } => Some(space_id),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TreeOptions
// ---------------------------------------------------------------------------

/// Everything a build needs besides the records themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOptions {
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    pub show_active: bool,
    pub show_paused: bool,
    pub show_completed: bool,
    pub scope: TreeScope,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            sort_column: SortColumn::Name,
            sort_direction: SortDirection::Asc,
            show_active: true,
            show_paused: false,
            show_completed: false,
            scope: TreeScope::Company,
        }
    }
}

impl TreeOptions {
    pub fn sorted_by(mut self, column: SortColumn, direction: SortDirection) -> Self {
        self.sort_column = column;
        self.sort_direction = direction;
        self
    }

    pub fn with_scope(mut self, scope: TreeScope) -> Self {
        self.scope = scope;
        self
    }

    /// Set all three status toggles at once.
    pub fn showing(mut self, active: bool, paused: bool, completed: bool) -> Self {
        self.show_active = active;
        self.show_paused = paused;
        self.show_completed = completed;
        self
    }

    /// Reject option combinations the type system cannot rule out.
    pub fn validate(&self) -> Result<()> {
        if let TreeScope::Person {
            champion: None,
            reviewer: None,
        } = self.scope
        {
            return Err(GoalTreeError::InvalidOption(
                "person scope needs a champion or reviewer id".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
