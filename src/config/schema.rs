//! Configuration data structures for goaltree.
//!
//! Defines the YAML/JSON options format. Sort fields stay strings here so
//! that a typo surfaces as [`GoalTreeError::UnknownSortColumn`] at
//! [`TreeConfig::into_options`] instead of a generic parse error.

use serde::{Deserialize, Serialize};

use super::options::{SortColumn, SortDirection, TreeOptions, TreeScope};
use crate::error::{GoalTreeError, Result};
use crate::types::Id;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Raw, caller-facing options as they appear in a file or request.
///
/// At most one scope family may be set: `space_id`, or
/// `person_id`/`reviewer_id` (either or both), or `goal_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    #[serde(default = "default_sort_column")]
    pub sort_column: String,

    #[serde(default = "default_sort_direction")]
    pub sort_direction: String,

    #[serde(default = "default_true")]
    pub show_active: bool,

    #[serde(default)]
    pub show_paused: bool,

    #[serde(default)]
    pub show_completed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_id: Option<Id>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<Id>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_id: Option<Id>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<Id>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            sort_column: default_sort_column(),
            sort_direction: default_sort_direction(),
            show_active: true,
            show_paused: false,
            show_completed: false,
            space_id: None,
            person_id: None,
            reviewer_id: None,
            goal_id: None,
        }
    }
}

impl TreeConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate and convert into builder options.
    pub fn into_options(self) -> Result<TreeOptions> {
        let sort_column = SortColumn::parse(&self.sort_column)?;
        let sort_direction = SortDirection::parse(&self.sort_direction)?;
        let scope = self.scope()?;

        let options = TreeOptions {
            sort_column,
            sort_direction,
            show_active: self.show_active,
            show_paused: self.show_paused,
            show_completed: self.show_completed,
            scope,
        };
        options.validate()?;
        Ok(options)
    }

    fn scope(&self) -> Result<TreeScope> {
        let person = self.person_id.is_some() || self.reviewer_id.is_some();
        let mut requested = Vec::new();
        if self.space_id.is_some() {
            requested.push("space_id");
        }
        if person {
            requested.push("person_id/reviewer_id");
        }
        if self.goal_id.is_some() {
            requested.push("goal_id");
        }
        if requested.len() > 1 {
            return Err(GoalTreeError::ConflictingScope(requested.join(", ")));
        }

        if let Some(space_id) = &self.space_id {
            return Ok(TreeScope::Space {
                space_id: space_id.clone(),
            });
        }
        if let Some(goal_id) = &self.goal_id {
            return Ok(TreeScope::Goal {
                goal_id: goal_id.clone(),
            });
        }
        if person {
            return Ok(TreeScope::Person {
                champion: self.person_id.clone(),
                reviewer: self.reviewer_id.clone(),
            });
        }
        Ok(TreeScope::Company)
    }
}

impl From<&TreeOptions> for TreeConfig {
    fn from(options: &TreeOptions) -> Self {
        let mut config = Self {
            sort_column: options.sort_column.as_str().to_string(),
            sort_direction: options.sort_direction.as_str().to_string(),
            show_active: options.show_active,
            show_paused: options.show_paused,
            show_completed: options.show_completed,
            ..Self::default()
        };
        match &options.scope {
            TreeScope::Company => {}
            TreeScope::Space { space_id } => config.space_id = Some(space_id.clone()),
            TreeScope::Person { champion, reviewer } => {
                config.person_id = champion.clone();
                config.reviewer_id = reviewer.clone();
            }
            TreeScope::Goal { goal_id } => config.goal_id = Some(goal_id.clone()),
        }
        config
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_sort_column() -> String {
    SortColumn::Name.as_str().to_string()
}

fn default_sort_direction() -> String {
    SortDirection::Asc.as_str().to_string()
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_matches_default_options() {
        let options = TreeConfig::default().into_options().unwrap();
        assert_eq!(options, TreeOptions::default());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = TreeConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, TreeConfig::default());
    }

    #[test]
    fn test_yaml_full_options() {
        let yaml = r#"
sort_column: lastCheckIn
sort_direction: desc
show_active: false
show_paused: true
show_completed: true
space_id: 12
"#;
        let options = TreeConfig::from_yaml_str(yaml)
            .unwrap()
            .into_options()
            .unwrap();
        assert_eq!(options.sort_column, SortColumn::LastCheckIn);
        assert_eq!(options.sort_direction, SortDirection::Desc);
        assert!(!options.show_active);
        assert!(options.show_paused);
        assert!(options.show_completed);
        assert_eq!(
            options.scope,
            TreeScope::Space {
                space_id: Id::from("12")
            }
        );
    }

    #[test]
    fn test_json_person_scope() {
        let json = r#"{"person_id": "john", "reviewer_id": "jane"}"#;
        let options = TreeConfig::from_json_str(json)
            .unwrap()
            .into_options()
            .unwrap();
        assert_eq!(
            options.scope,
            TreeScope::Person {
                champion: Some(Id::from("john")),
                reviewer: Some(Id::from("jane")),
            }
        );
    }

    #[test]
    fn test_unknown_sort_column_rejected() {
        let config = TreeConfig {
            sort_column: "priority".to_string(),
            ..TreeConfig::default()
        };
        assert!(matches!(
            config.into_options(),
            Err(GoalTreeError::UnknownSortColumn(_))
        ));
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let config = TreeConfig {
            sort_direction: "up".to_string(),
            ..TreeConfig::default()
        };
        assert!(matches!(
            config.into_options(),
            Err(GoalTreeError::InvalidOption(_))
        ));
    }

    #[test]
    fn test_conflicting_scopes_rejected() {
        let config = TreeConfig {
            space_id: Some(Id::from("s")),
            goal_id: Some(Id::from("g")),
            ..TreeConfig::default()
        };
        let err = config.into_options().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Conflicting scope selectors: space_id, goal_id"
        );
    }

    #[test]
    fn test_options_roundtrip_through_config() {
        let options = TreeOptions::default()
            .sorted_by(SortColumn::Progress, SortDirection::Desc)
            .showing(true, true, false)
            .with_scope(TreeScope::Goal {
                goal_id: Id::from("g9"),
            });
        let yaml = serde_yaml::to_string(&TreeConfig::from(&options)).unwrap();
        let back = TreeConfig::from_yaml_str(&yaml)
            .unwrap()
            .into_options()
            .unwrap();
        assert_eq!(back, options);
    }
}
