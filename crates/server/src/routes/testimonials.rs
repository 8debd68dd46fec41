//! Testimonial CRUD handlers.
//!
//! Mirrors the project handlers: public reads, session-gated writes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use atelier_core::TestimonialId;

use crate::db::TestimonialRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{NewTestimonial, Testimonial, TestimonialPatch};
use crate::state::AppState;

/// List all testimonials in display order.
///
/// GET /api/testimonials
pub async fn index(State(state): State<AppState>) -> Json<Vec<Testimonial>> {
    Json(TestimonialRepository::new(state.testimonials()).list().await)
}

/// Fetch a single testimonial.
///
/// GET /api/testimonials/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Testimonial>> {
    let testimonial = TestimonialRepository::new(state.testimonials())
        .get(TestimonialId::new(id))
        .await?;
    Ok(Json(testimonial))
}

/// Create a testimonial.
///
/// POST /api/testimonials
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
    Json(new): Json<NewTestimonial>,
) -> Result<impl IntoResponse> {
    let testimonial = TestimonialRepository::new(state.testimonials())
        .create(new)
        .await?;
    tracing::info!(id = %testimonial.id, user = claims.username(), "testimonial created");
    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// Partially update a testimonial.
///
/// PUT /api/testimonials/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    RequireAdmin(claims): RequireAdmin,
    Json(patch): Json<TestimonialPatch>,
) -> Result<Json<Testimonial>> {
    let testimonial = TestimonialRepository::new(state.testimonials())
        .update(TestimonialId::new(id), patch)
        .await?;
    tracing::info!(id = %testimonial.id, user = claims.username(), "testimonial updated");
    Ok(Json(testimonial))
}

/// Delete a testimonial, returning the removed entity.
///
/// DELETE /api/testimonials/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    RequireAdmin(claims): RequireAdmin,
) -> Result<Json<Testimonial>> {
    let testimonial = TestimonialRepository::new(state.testimonials())
        .delete(TestimonialId::new(id))
        .await?;
    tracing::info!(id = %testimonial.id, user = claims.username(), "testimonial deleted");
    Ok(Json(testimonial))
}
