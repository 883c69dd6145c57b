//! Error types for the status image server

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use file_image_store::StoreError;
use status_image_origin::OriginError;
use std::fmt;

/// Startup failures
#[derive(Debug)]
pub enum ServerError {
    Store(StoreError),
    Origin(OriginError),
    Io(Box<std::io::Error>),
    Config(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Store(err) => write!(f, "Cache error: {}", err),
            ServerError::Origin(err) => write!(f, "Origin error: {}", err),
            ServerError::Io(err) => write!(f, "IO error: {}", err),
            ServerError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Store(err) => Some(err),
            ServerError::Origin(err) => Some(err),
            ServerError::Io(err) => Some(err.as_ref()),
            ServerError::Config(_) => None,
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        ServerError::Store(err)
    }
}

impl From<OriginError> for ServerError {
    fn from(err: OriginError) -> Self {
        ServerError::Origin(err)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for ServerError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ServerError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

/// Per-request failures, rendered as plain text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    InvalidRequest,
    MethodNotAllowed,
    ImageNotFound,
    WriteFailed,
    FileNotFound,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::InvalidRequest => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::ImageNotFound | ApiError::FileNotFound => StatusCode::NOT_FOUND,
            ApiError::WriteFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ApiError::InvalidRequest => "Invalid request format",
            ApiError::MethodNotAllowed => "Method not allowed",
            ApiError::ImageNotFound => "Image not found on origin or cache",
            ApiError::WriteFailed => "File write error",
            ApiError::FileNotFound => "File not found",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain")],
            self.message(),
        )
            .into_response()
    }
}
