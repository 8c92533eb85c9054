//! Domain types for portfolio project records.
//!
//! A [`Project`] is a persisted record: an identity assigned by the store plus
//! its [`ProjectFields`]. `ProjectFields` alone is the "record without
//! identity" shape sent on create and update.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Opaque, store-assigned identity of a project record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Every mutable field of a project record.
///
/// `tech_stack` is ordered (insertion order is display order) and holds no
/// duplicate or empty tag once it has gone through the draft editor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectFields {
    pub title: String,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tech_stack: Vec<String>,
    // Absent links serialize as `null` so an update clears them remotely.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub live_link: Option<String>,
}

impl ProjectFields {
    /// Title and description must be non-empty after trimming.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        Ok(())
    }

    /// Case-sensitive exact match.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tech_stack.iter().any(|t| t == tag)
    }
}

/// A persisted project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(flatten)]
    pub fields: ProjectFields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn new(id: impl Into<ProjectId>, fields: ProjectFields) -> Self {
        Self {
            id: id.into(),
            fields,
            created_at: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.fields.title
    }
}

/// Trim a candidate tag; `None` when nothing is left.
pub fn normalize_tag(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Stores return `null` for a project that never had tags.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, description: &str) -> ProjectFields {
        ProjectFields {
            title: title.to_string(),
            description: description.to_string(),
            ..ProjectFields::default()
        }
    }

    #[test]
    fn project_id_display() {
        assert_eq!(ProjectId::from("abc-123").to_string(), "abc-123");
        assert_eq!(ProjectId::from(String::from("x")), ProjectId::from("x"));
    }

    #[test]
    fn validate_rejects_blank_title_before_description() {
        assert_eq!(fields("  ", "").validate(), Err(ValidationError::MissingTitle));
        assert_eq!(
            fields("Site", "\t").validate(),
            Err(ValidationError::MissingDescription)
        );
        assert_eq!(fields("Site", "A site").validate(), Ok(()));
    }

    #[test]
    fn has_tag_is_case_sensitive() {
        let mut f = fields("t", "d");
        f.tech_stack = vec!["React".to_string()];
        assert!(f.has_tag("React"));
        assert!(!f.has_tag("react"));
    }

    #[test]
    fn normalize_tag_trims_and_rejects_blank() {
        assert_eq!(normalize_tag("  Rust "), Some("Rust".to_string()));
        assert_eq!(normalize_tag("   "), None);
        assert_eq!(normalize_tag(""), None);
    }

    #[test]
    fn project_json_is_flat_and_tolerates_null_tags() {
        let json = r#"{
            "id": "7f1c",
            "title": "Portfolio Site",
            "description": "A site",
            "tech_stack": null,
            "github_link": "https://github.com/me/site"
        }"#;
        let project: Project = serde_json::from_str(json).expect("deserialize");
        assert_eq!(project.id, ProjectId::from("7f1c"));
        assert!(project.fields.tech_stack.is_empty());
        assert_eq!(project.fields.image_url, None);
        assert_eq!(
            project.fields.github_link.as_deref(),
            Some("https://github.com/me/site")
        );

        let back = serde_json::to_value(&project).expect("serialize");
        assert_eq!(back["title"], "Portfolio Site");
        assert!(back["image_url"].is_null());
        assert!(back.as_object().unwrap().contains_key("live_link"));
        assert!(back.get("fields").is_none());
    }
}
