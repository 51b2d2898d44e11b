//! HTTP mapping for request failures.
//!
//! Every failure ends as a response; none of them stop the server.

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde_json::json;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("could not decode request body: {0}")]
    Parse(String),

    #[error("resource not found")]
    NotFound,

    #[error("destructive reset is only allowed on the dev platform")]
    Forbidden,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            other => ApiError::Store(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Parse(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            ApiError::NotFound => builder.finish(),
            ApiError::Forbidden => builder
                .insert_header((header::CONTENT_TYPE, "text/plain; charset=utf-8"))
                .body(self.to_string()),
            ApiError::Parse(_) => {
                error!("Rejected request: {}", self);
                builder.json(json!({ "error": self.to_string() }))
            }
            ApiError::Store(err) => {
                error!("Store failure: {:?}", err);
                builder.json(json!({ "error": "Internal server error" }))
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
