//! Newsletter subscription route handler.
//!
//! Sign-ups are recorded in the log only; there is no mailing-list backend.

use axum::{
    Form,
    extract::rejection::FormRejection,
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use trailhead_core::Email;

use crate::error::{AppError, Result};

/// Newsletter subscription form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubscribeForm {
    pub email: String,
}

/// Subscribe an email address to the newsletter.
#[instrument(skip(form))]
pub async fn subscribe(
    form: std::result::Result<Form<SubscribeForm>, FormRejection>,
) -> Result<(StatusCode, &'static str)> {
    let invalid = || AppError::BadRequest("Please enter a valid email address.".to_string());

    let Form(form) = form.map_err(|_| invalid())?;
    let email = Email::parse(&form.email).map_err(|e| {
        tracing::debug!(error = %e, "Rejected newsletter email");
        invalid()
    })?;

    tracing::info!(email = %email, "New newsletter subscriber");

    Ok((StatusCode::OK, "Subscribed!"))
}
