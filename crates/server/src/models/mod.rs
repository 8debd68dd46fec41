//! Domain models for the portfolio API.
//!
//! Each collection has three shapes: the stored entity (`Project`,
//! `Testimonial`), the create payload (`NewProject`, `NewTestimonial`) and
//! the partial update payload (`ProjectPatch`, `TestimonialPatch`). The
//! documents persisted by the store wrap the entity lists so the on-disk
//! layout is exactly `{ "<collection>": [...] }`.

pub mod project;
pub mod session;
pub mod testimonial;

pub use project::{NewProject, Project, ProjectPatch, ProjectsDocument};
pub use session::SessionClaims;
pub use testimonial::{NewTestimonial, Testimonial, TestimonialPatch, TestimonialsDocument};
