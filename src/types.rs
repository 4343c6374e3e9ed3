//! Core domain types for goaltree.
//!
//! Source records as delivered by the goal and project APIs, plus the
//! identifier type shared by every comparison in the crate.

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Id
// ---------------------------------------------------------------------------

/// An entity identifier.
///
/// Two ids are equal when their canonical forms match (see [`ids_equal`]),
/// so `Id::from("42") == Id::from(42u64)`. `Hash` agrees with `Eq`, which
/// makes `Id` safe as a `HashMap` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct Id(String);

impl Id {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The identifier exactly as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical form used for equality and hashing.
    pub fn canonical(&self) -> Cow<'_, str> {
        canonical_id(&self.0)
    }
}

impl PartialEq for Id {
    fn eq(&self, other: &Self) -> bool {
        ids_equal(&self.0, &other.0)
    }
}

impl Eq for Id {}

impl Hash for Id {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for Id {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<u64> for Id {
    fn from(raw: u64) -> Self {
        Self(raw.to_string())
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

/// Wire representation: APIs send ids as strings or bare integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for Id {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        }
    }
}

/// Compare two raw identifiers the way every part of the crate does.
///
/// Whitespace around the id is ignored and numeric ids compare by value
/// (`"007"` equals `"7"`). Anything else must match exactly, since short
/// ids such as `"aB3x"` and `"Ab3X"` name different records.
pub fn ids_equal(a: &str, b: &str) -> bool {
    canonical_id(a) == canonical_id(b)
}

fn canonical_id(raw: &str) -> Cow<'_, str> {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let digits = trimmed.trim_start_matches('0');
        return Cow::Borrowed(if digits.is_empty() { "0" } else { digits });
    }
    Cow::Borrowed(trimmed)
}

// ---------------------------------------------------------------------------
// People and spaces
// ---------------------------------------------------------------------------

/// A person referenced as champion or reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Id,
    pub full_name: String,
}

/// An organizational space that goals and projects belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub is_company_space: bool,
}

// ---------------------------------------------------------------------------
// Shared record parts
// ---------------------------------------------------------------------------

/// A status update posted on a goal or project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: Id,
    pub inserted_at: DateTime<Utc>,
}

/// The period a goal is planned for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeframe {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Milestone completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneStatus {
    Pending,
    Done,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: Id,
    pub title: String,
    pub status: MilestoneStatus,
}

/// Closing notes written when a project ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Retrospective {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

/// The goal a project is attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRef {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a project.
///
/// Deserializes through [`ProjectStatus::from_str_loose`], so `"Active"`
/// and `"on_hold"` are accepted alongside the canonical lowercase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ProjectStatus {
    Active,
    Paused,
    Closed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Closed => "closed",
        }
    }

    /// Case-insensitive; `-`, `_` and spaces are ignored.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "active" => Some(Self::Active),
            "paused" | "onhold" => Some(Self::Paused),
            "closed" | "done" | "completed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = String;

    fn try_from(raw: String) -> std::result::Result<Self, Self::Error> {
        Self::from_str_loose(&raw).ok_or_else(|| {
            format!("unknown project status `{raw}`, expected active, paused or closed")
        })
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Goal
// ---------------------------------------------------------------------------

/// A goal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Id,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_goal_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion: Option<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<Person>,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<Timeframe>,
    pub space: Space,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check_in: Option<CheckIn>,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// A project record.
///
/// `status` is optional on the wire only so that a missing value can be
/// reported with the project's id; building a tree from such a record fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<GoalRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion: Option<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    pub space: Space,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check_in: Option<CheckIn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrospective: Option<Retrospective>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use test_case::test_case;

    #[test_case("42", "42", true ; "identical")]
    #[test_case("42", "042", true ; "leading zeros")]
    #[test_case(" 42 ", "42", true ; "surrounding whitespace")]
    #[test_case("0", "000", true ; "all zeros")]
    #[test_case("abc-def", "abc-def", true ; "same text")]
    #[test_case("aB3x", "Ab3X", false ; "case distinct short ids")]
    #[test_case("42", "43", false ; "different numbers")]
    #[test_case("a1", "a01", false ; "non numeric keeps zeros")]
    fn ids_equal_cases(a: &str, b: &str, expected: bool) {
        assert_eq!(ids_equal(a, b), expected);
        assert_eq!(Id::from(a) == Id::from(b), expected);
    }

    #[test]
    fn id_hash_agrees_with_eq() {
        let mut map = HashMap::new();
        map.insert(Id::from("0012"), "goal");
        assert_eq!(map.get(&Id::from(12u64)), Some(&"goal"));
    }

    #[test]
    fn id_deserializes_from_string_or_number() {
        let ids: Vec<Id> = serde_json::from_str(r#"["7", 7, "x"]"#).unwrap();
        assert_eq!(ids[0], ids[1]);
        assert_eq!(ids[2].as_str(), "x");
        assert_eq!(serde_json::to_string(&ids[1]).unwrap(), r#""7""#);
    }

    #[test_case("active", Some(ProjectStatus::Active) ; "active")]
    #[test_case("PAUSED", Some(ProjectStatus::Paused) ; "paused upper")]
    #[test_case(" closed ", Some(ProjectStatus::Closed) ; "closed padded")]
    #[test_case("on_hold", Some(ProjectStatus::Paused) ; "on hold snake")]
    #[test_case("On-Hold", Some(ProjectStatus::Paused) ; "on hold kebab")]
    #[test_case("Completed", Some(ProjectStatus::Closed) ; "completed")]
    #[test_case("archived", None ; "unknown")]
    fn project_status_from_str_loose(input: &str, expected: Option<ProjectStatus>) {
        assert_eq!(ProjectStatus::from_str_loose(input), expected);
    }

    #[test]
    fn project_deserializes_camel_case() {
        let json = r#"{
            "id": "p1",
            "name": "Launch",
            "goal": {"id": "g1"},
            "status": "paused",
            "space": {"id": 3, "name": "Product"},
            "milestones": [{"id": "m1", "title": "Beta", "status": "done"}],
            "startedAt": "2024-01-01T00:00:00Z"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.goal.map(|g| g.id), Some(Id::from("g1")));
        assert_eq!(project.status, Some(ProjectStatus::Paused));
        assert!(!project.space.is_company_space);
        assert_eq!(project.milestones[0].status, MilestoneStatus::Done);
        assert!(project.started_at.is_some());
        assert!(project.deadline.is_none());
    }

    #[test_case(r#""Active""#, ProjectStatus::Active ; "capitalised")]
    #[test_case(r#""on_hold""#, ProjectStatus::Paused ; "on hold")]
    #[test_case(r#""completed""#, ProjectStatus::Closed ; "completed")]
    fn project_status_deserializes_loose_forms(raw: &str, expected: ProjectStatus) {
        let json = format!(r#"{{"id": "p1", "name": "X", "status": {raw}, "space": {{"id": "s", "name": "S"}}}}"#);
        let project: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(project.status, Some(expected));
        assert_eq!(serde_json::to_value(expected).unwrap(), expected.as_str());
    }

    #[test]
    fn unknown_project_status_is_a_parse_error() {
        let json = r#"{"id": "p1", "name": "X", "status": "archived", "space": {"id": "s", "name": "S"}}"#;
        let err = serde_json::from_str::<Project>(json).unwrap_err();
        assert!(err.to_string().contains("unknown project status `archived`"));
    }

    #[test]
    fn project_without_status_still_deserializes() {
        let json = r#"{"id": "p1", "name": "X", "space": {"id": "s", "name": "S"}}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.status, None);
        assert!(project.milestones.is_empty());
    }

    #[test]
    fn goal_deserializes_timeframe() {
        let json = r#"{
            "id": "g1",
            "name": "Grow",
            "parentGoalId": null,
            "isClosed": false,
            "progressPercentage": 40.5,
            "timeframe": {"startDate": "2024-01-01", "endDate": "2024-03-31"},
            "space": {"id": "s", "name": "Company", "isCompanySpace": true}
        }"#;
        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.parent_goal_id, None);
        assert_eq!(
            goal.timeframe.map(|t| t.end_date),
            NaiveDate::from_ymd_opt(2024, 3, 31)
        );
        assert!(goal.space.is_company_space);
    }
}
