//! Project repository over the projects document store.
//!
//! All mutations go through [`DocumentStore::write`], so they are serialized
//! per collection and persisted atomically. IDs are assigned here (max
//! existing + 1) and timestamps are owned by this layer; callers never
//! supply either.

use chrono::Utc;

use atelier_core::ProjectId;

use super::{DocumentStore, RepositoryError};
use crate::models::{NewProject, Project, ProjectPatch, ProjectsDocument};

/// Repository for project CRUD operations.
pub struct ProjectRepository<'a> {
    store: &'a DocumentStore<ProjectsDocument>,
}

impl<'a> ProjectRepository<'a> {
    /// Create a new project repository.
    #[must_use]
    pub const fn new(store: &'a DocumentStore<ProjectsDocument>) -> Self {
        Self { store }
    }

    /// All projects in display order.
    pub async fn list(&self) -> Vec<Project> {
        self.store.read().await.projects
    }

    /// Look up a single project.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no project has `id`.
    pub async fn get(&self, id: ProjectId) -> Result<Project, RepositoryError> {
        self.store
            .read()
            .await
            .projects
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)
    }

    /// Append a new project with a freshly assigned ID and timestamps.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if required fields are blank,
    /// or `RepositoryError::Store` if persistence fails.
    pub async fn create(&self, new: NewProject) -> Result<Project, RepositoryError> {
        require("title", &new.title)?;
        require("description", &new.description)?;

        self.store
            .write(|doc| {
                let now = Utc::now();
                let project = Project {
                    id: next_id(&doc.projects),
                    title: new.title,
                    description: new.description,
                    tags: new.tags,
                    image: new.image,
                    demo_url: new.demo_url,
                    repo_url: new.repo_url,
                    featured: new.featured,
                    created_at: now,
                    updated_at: now,
                };
                doc.projects.push(project.clone());
                Ok(project)
            })
            .await
    }

    /// Merge `patch` into an existing project and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no project has `id`,
    /// `RepositoryError::Validation` if a patched field is blank, or
    /// `RepositoryError::Store` if persistence fails.
    pub async fn update(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, RepositoryError> {
        if let Some(title) = &patch.title {
            require("title", title)?;
        }
        if let Some(description) = &patch.description {
            require("description", description)?;
        }

        self.store
            .write(move |doc| {
                let project = doc
                    .projects
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or(RepositoryError::NotFound)?;

                if let Some(title) = patch.title {
                    project.title = title;
                }
                if let Some(description) = patch.description {
                    project.description = description;
                }
                if let Some(tags) = patch.tags {
                    project.tags = tags;
                }
                if let Some(image) = patch.image {
                    project.image = Some(image);
                }
                if let Some(demo_url) = patch.demo_url {
                    project.demo_url = Some(demo_url);
                }
                if let Some(repo_url) = patch.repo_url {
                    project.repo_url = Some(repo_url);
                }
                if let Some(featured) = patch.featured {
                    project.featured = featured;
                }
                project.updated_at = Utc::now();

                Ok(project.clone())
            })
            .await
    }

    /// Remove a project and return it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no project has `id`, or
    /// `RepositoryError::Store` if persistence fails.
    pub async fn delete(&self, id: ProjectId) -> Result<Project, RepositoryError> {
        self.store
            .write(move |doc| {
                let index = doc
                    .projects
                    .iter()
                    .position(|p| p.id == id)
                    .ok_or(RepositoryError::NotFound)?;
                Ok(doc.projects.remove(index))
            })
            .await
    }
}

/// Next ID for a collection: one past the highest assigned so far.
fn next_id(projects: &[Project]) -> ProjectId {
    ProjectId::new(projects.iter().map(|p| p.id.as_i64()).max().unwrap_or(0) + 1)
}

/// Reject blank required fields.
fn require(field: &str, value: &str) -> Result<(), RepositoryError> {
    if value.trim().is_empty() {
        return Err(RepositoryError::Validation(format!(
            "{field} must not be blank"
        )));
    }
    Ok(())
}
