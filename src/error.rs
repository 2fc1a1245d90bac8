use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

use crate::forms::FieldErrors;
use crate::views;

#[derive(Debug, ThisError)]
pub enum OpalError {
    #[error("entity not found")]
    NotFound,

    #[error("validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("database error: {0}")]
    Database(#[from] SqlxError),

    #[error("password hashing error: {0}")]
    PasswordHash(String),

    #[error("not authenticated")]
    Unauthorized,
}

impl IntoResponse for OpalError {
    fn into_response(self) -> axum::response::Response {
        match self {
            OpalError::NotFound => {
                (StatusCode::NOT_FOUND, Html(views::not_found_page())).into_response()
            }
            // Handlers normally intercept this variant and re-render the form
            // with inline messages; this branch is the fallback.
            OpalError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(views::validation_page(&errors)),
            )
                .into_response(),
            OpalError::Database(e) => {
                error!(error = %e, "persistence failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::server_error_page()),
                )
                    .into_response()
            }
            OpalError::PasswordHash(e) => {
                error!(error = %e, "password hashing failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::server_error_page()),
                )
                    .into_response()
            }
            OpalError::Unauthorized => Redirect::to("/login").into_response(),
        }
    }
}
