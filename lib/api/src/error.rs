use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use cinerank_core::{Error, ModelKind};
use serde_json::json;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Engine(#[from] Error),

    #[error("Model not available: {0}")]
    ModelUnavailable(ModelKind),

    #[error("Reload is not configured for this server")]
    ReloadUnavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Engine(Error::TitlesNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Engine(Error::InvalidRequest(_)) | ApiError::Engine(Error::InvalidConfig(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Engine(Error::Load(_)) | ApiError::Engine(Error::Io(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::ModelUnavailable(_) | ApiError::ReloadUnavailable => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Engine(Error::TitlesNotFound(missing)) => json!({
                "error": self.to_string(),
                "missing": missing,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
