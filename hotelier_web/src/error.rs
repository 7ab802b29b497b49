//! Error pages returned by the handlers.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use hotelier::application::ServiceError;
use tracing::error;

use crate::views;

/// A failure rendered as a full HTML page with a matching status.
#[derive(Debug)]
pub struct PageError {
    status: StatusCode,
    message: String,
}

impl PageError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn title(&self) -> &'static str {
        match self.status {
            StatusCode::NOT_FOUND => "Page introuvable",
            StatusCode::CONFLICT => "Opération impossible",
            StatusCode::BAD_REQUEST => "Requête invalide",
            _ => "Erreur",
        }
    }
}

impl From<ServiceError> for PageError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::NotFound { .. } => Self::not_found(value.to_string()),
            ServiceError::ReferentialIntegrity { .. } => {
                Self::new(StatusCode::CONFLICT, value.to_string())
            }
            ServiceError::Validation(_) | ServiceError::Duplicate(_) | ServiceError::Unavailable => {
                Self::new(StatusCode::BAD_REQUEST, value.to_string())
            }
            ServiceError::DataAccess(e) => {
                error!("storage failure: {}", e);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Le service est momentanément indisponible, veuillez réessayer plus tard.",
                )
            }
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status, Html(views::error(self.title(), &self.message))).into_response()
    }
}
