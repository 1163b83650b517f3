//! Handlers for newsletter and contact endpoints.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::common::MessageResponse;
use crate::api::dto::outreach::{ContactFormRequest, NewsletterRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Subscribes an email to the newsletter.
///
/// # Endpoint
///
/// `POST /api/newsletter`
///
/// # Errors
///
/// Returns 400 on an invalid email, 409 when already subscribed.
pub async fn newsletter_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewsletterRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    state.outreach_service.subscribe(&payload.email).await?;

    Ok(Json(MessageResponse::new(
        "Subscribed and notified successfully",
    )))
}

/// Stores a contact-form submission.
///
/// # Endpoint
///
/// `POST /api/contact`
pub async fn contact_handler(
    State(state): State<AppState>,
    Json(payload): Json<ContactFormRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    state
        .outreach_service
        .submit_contact(&payload.name, &payload.email, payload.date)
        .await?;

    Ok(Json(MessageResponse::new(
        "Contact form submitted and email sent to admin.",
    )))
}
