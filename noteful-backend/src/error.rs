//! Error taxonomy for the REST layer.
//!
//! Validation and not-found errors are expected outcomes and are rendered as
//! `{"error":{"message":...}}` with 400/404. Storage and pool failures are
//! logged in full and rendered as an opaque 500.

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;

use crate::db::tables::notes::NoteWriteError;
use crate::models::Resource;

/// Body message for every 5xx response
pub const SERVER_ERROR_MESSAGE: &str = "server error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} doesn't exist")]
    NotFound(Resource),

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

impl ApiError {
    /// Validation error for a required field that is absent or blank
    pub fn missing_field(field: &str) -> Self {
        ApiError::Validation(format!("Missing '{}' in request body", field))
    }

    /// The message shown to the caller. Internal detail never leaves the process.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Storage(_) | ApiError::Pool(_) => SERVER_ERROR_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<NoteWriteError> for ApiError {
    fn from(err: NoteWriteError) -> Self {
        match err {
            NoteWriteError::MissingFolder(id) => {
                ApiError::Validation(format!("Folder {} referenced by 'folder_id' doesn't exist", id))
            }
            NoteWriteError::Sqlite(e) => ApiError::Storage(e),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": { "message": self.public_message() }
        }))
    }
}

/// Renders malformed or mistyped JSON bodies in the same shape as other errors
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(format!("Invalid JSON body: {}", err)).into()
}

pub type ApiResult<T> = Result<T, ApiError>;
