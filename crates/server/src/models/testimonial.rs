//! Testimonial domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atelier_core::TestimonialId;

/// A client or colleague testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Unique testimonial ID, assigned by the repository.
    pub id: TestimonialId,
    /// Who said it.
    pub author: String,
    /// The quote itself.
    pub quote: String,
    /// The author's role or company line (e.g., "CTO, Acme").
    #[serde(default)]
    pub role: Option<String>,
    /// Path or URL of the author's avatar.
    #[serde(default)]
    pub avatar: Option<String>,
    /// When the testimonial was created (set by the repository).
    pub created_at: DateTime<Utc>,
    /// When the testimonial was last updated (set by the repository).
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a testimonial.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTestimonial {
    pub author: String,
    pub quote: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Partial update for a testimonial. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestimonialPatch {
    pub author: Option<String>,
    pub quote: Option<String>,
    pub role: Option<String>,
    pub avatar: Option<String>,
}

/// The persisted testimonials document: `{ "testimonials": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonialsDocument {
    pub testimonials: Vec<Testimonial>,
}
