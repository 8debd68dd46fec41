//! Project domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atelier_core::ProjectId;

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project ID, assigned by the repository.
    pub id: ProjectId,
    /// Display title.
    pub title: String,
    /// Short description shown on the projects page.
    pub description: String,
    /// Technology tags, in display order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Path or URL of the cover image.
    #[serde(default)]
    pub image: Option<String>,
    /// Live demo URL.
    #[serde(default)]
    pub demo_url: Option<String>,
    /// Source repository URL.
    #[serde(default)]
    pub repo_url: Option<String>,
    /// Whether the project is pinned to the home page.
    #[serde(default)]
    pub featured: bool,
    /// When the project was created (set by the repository).
    pub created_at: DateTime<Utc>,
    /// When the project was last updated (set by the repository).
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a project.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Partial update for a project. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image: Option<String>,
    pub demo_url: Option<String>,
    pub repo_url: Option<String>,
    pub featured: Option<bool>,
}

/// The persisted projects document: `{ "projects": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectsDocument {
    pub projects: Vec<Project>,
}
