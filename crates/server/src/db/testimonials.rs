//! Testimonial repository over the testimonials document store.
//!
//! Same shape as the project repository: ID assignment and timestamps live
//! here, persistence and write ordering live in [`DocumentStore`].

use chrono::Utc;

use atelier_core::TestimonialId;

use super::{DocumentStore, RepositoryError};
use crate::models::{NewTestimonial, Testimonial, TestimonialPatch, TestimonialsDocument};

/// Repository for testimonial CRUD operations.
pub struct TestimonialRepository<'a> {
    store: &'a DocumentStore<TestimonialsDocument>,
}

impl<'a> TestimonialRepository<'a> {
    /// Create a new testimonial repository.
    #[must_use]
    pub const fn new(store: &'a DocumentStore<TestimonialsDocument>) -> Self {
        Self { store }
    }

    /// All testimonials in display order.
    pub async fn list(&self) -> Vec<Testimonial> {
        self.store.read().await.testimonials
    }

    /// Look up a single testimonial.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no testimonial has `id`.
    pub async fn get(&self, id: TestimonialId) -> Result<Testimonial, RepositoryError> {
        self.store
            .read()
            .await
            .testimonials
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(RepositoryError::NotFound)
    }

    /// Append a new testimonial with a freshly assigned ID and timestamps.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if required fields are blank,
    /// or `RepositoryError::Store` if persistence fails.
    pub async fn create(&self, new: NewTestimonial) -> Result<Testimonial, RepositoryError> {
        require("author", &new.author)?;
        require("quote", &new.quote)?;

        self.store
            .write(|doc| {
                let now = Utc::now();
                let testimonial = Testimonial {
                    id: next_id(&doc.testimonials),
                    author: new.author,
                    quote: new.quote,
                    role: new.role,
                    avatar: new.avatar,
                    created_at: now,
                    updated_at: now,
                };
                doc.testimonials.push(testimonial.clone());
                Ok(testimonial)
            })
            .await
    }

    /// Merge `patch` into an existing testimonial and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no testimonial has `id`,
    /// `RepositoryError::Validation` if a patched field is blank, or
    /// `RepositoryError::Store` if persistence fails.
    pub async fn update(
        &self,
        id: TestimonialId,
        patch: TestimonialPatch,
    ) -> Result<Testimonial, RepositoryError> {
        if let Some(author) = &patch.author {
            require("author", author)?;
        }
        if let Some(quote) = &patch.quote {
            require("quote", quote)?;
        }

        self.store
            .write(move |doc| {
                let testimonial = doc
                    .testimonials
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or(RepositoryError::NotFound)?;

                if let Some(author) = patch.author {
                    testimonial.author = author;
                }
                if let Some(quote) = patch.quote {
                    testimonial.quote = quote;
                }
                if let Some(role) = patch.role {
                    testimonial.role = Some(role);
                }
                if let Some(avatar) = patch.avatar {
                    testimonial.avatar = Some(avatar);
                }
                testimonial.updated_at = Utc::now();

                Ok(testimonial.clone())
            })
            .await
    }

    /// Remove a testimonial and return it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no testimonial has `id`, or
    /// `RepositoryError::Store` if persistence fails.
    pub async fn delete(&self, id: TestimonialId) -> Result<Testimonial, RepositoryError> {
        self.store
            .write(move |doc| {
                let index = doc
                    .testimonials
                    .iter()
                    .position(|t| t.id == id)
                    .ok_or(RepositoryError::NotFound)?;
                Ok(doc.testimonials.remove(index))
            })
            .await
    }
}

/// Next ID for a collection: one past the highest assigned so far.
fn next_id(testimonials: &[Testimonial]) -> TestimonialId {
    TestimonialId::new(
        testimonials
            .iter()
            .map(|t| t.id.as_i64())
            .max()
            .unwrap_or(0)
            + 1,
    )
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
