use actix_web::error::JsonPayloadError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Only {0} method is allowed")]
    MethodNotAllowed(&'static str),
}

impl From<JsonPayloadError> for AppError {
    fn from(e: JsonPayloadError) -> Self {
        AppError::BadRequest(format!("Failed to parse request: {}", e))
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::MethodNotAllowed(allowed) => HttpResponse::MethodNotAllowed()
                .insert_header((header::ALLOW, *allowed))
                .json(serde_json::json!({
                    "error": self.to_string()
                })),
        }
    }
}
