//! Request dispatch and the three cache operations

use crate::error::ApiError;
use crate::server::SharedState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderName, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use file_image_store::{StatusKey, StoreError};
use tracing::{debug, error, warn};

/// Every entry is served as JPEG regardless of its bytes
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// What a request asks of the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    Put,
    Delete,
    MethodNotAllowed,
}

impl From<&Method> for Operation {
    fn from(method: &Method) -> Self {
        match method.as_str() {
            "GET" => Operation::Get,
            "PUT" => Operation::Put,
            "DELETE" => Operation::Delete,
            _ => Operation::MethodNotAllowed,
        }
    }
}

/// Where the bytes of a successful GET came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// Single entry point for every request.
///
/// The whole request target must be `/ddd`; a query string makes it invalid.
pub async fn handle_request(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    body: Body,
) -> Result<Response, ApiError> {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let key = StatusKey::from_request_target(target).ok_or_else(|| {
        debug!(request_target = %target, "Rejected request target");
        ApiError::InvalidRequest
    })?;

    match Operation::from(&method) {
        Operation::Get => retrieve(&state, key).await,
        Operation::Put => store(&state, key, body).await,
        Operation::Delete => remove(&state, key).await,
        Operation::MethodNotAllowed => Err(ApiError::MethodNotAllowed),
    }
}

/// GET: serve from the cache, falling back to the origin with write-through
async fn retrieve(state: &SharedState, key: StatusKey) -> Result<Response, ApiError> {
    match state.store.get(&key).await {
        Ok(Some(data)) => {
            debug!(key = %key, "Cache hit");
            return Ok(image_response(data, CacheStatus::Hit));
        }
        Ok(None) => debug!(key = %key, "Cache miss"),
        Err(e) => warn!(key = %key, error = %e, "Failed to read cache entry, trying origin"),
    }

    let data = state.origin.fetch(&key).await.map_err(|e| {
        warn!(key = %key, error = %e, "Failed to fetch image from origin");
        ApiError::ImageNotFound
    })?;

    // The response does not depend on the write succeeding.
    if let Err(e) = state.store.put(&key, &data).await {
        warn!(key = %key, error = %e, "Failed to cache fetched image");
    }

    Ok(image_response(data, CacheStatus::Miss))
}

/// PUT: buffer the whole body, then replace the entry
async fn store(state: &SharedState, key: StatusKey, body: Body) -> Result<Response, ApiError> {
    let data = axum::body::to_bytes(body, usize::MAX).await.map_err(|e| {
        error!(key = %key, error = %e, "Failed to read request body");
        ApiError::WriteFailed
    })?;

    state.store.put(&key, &data).await.map_err(|e| {
        error!(key = %key, error = %e, "Failed to write cache entry");
        ApiError::WriteFailed
    })?;

    debug!(key = %key, size = data.len(), "Stored image");
    Ok(text_response(StatusCode::CREATED, "File saved"))
}

/// DELETE: remove the entry
async fn remove(state: &SharedState, key: StatusKey) -> Result<Response, ApiError> {
    match state.store.delete(&key).await {
        Ok(()) => Ok(text_response(StatusCode::OK, "File deleted")),
        Err(StoreError::NotFound(_)) => Err(ApiError::FileNotFound),
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to delete cache entry");
            Err(ApiError::FileNotFound)
        }
    }
}

fn image_response(data: Vec<u8>, cache_status: CacheStatus) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, IMAGE_CONTENT_TYPE),
            (X_CACHE, cache_status.as_str()),
        ],
        data,
    )
        .into_response()
}

fn text_response(status: StatusCode, message: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, "text/plain")], message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_from_method() {
        assert_eq!(Operation::from(&Method::GET), Operation::Get);
        assert_eq!(Operation::from(&Method::PUT), Operation::Put);
        assert_eq!(Operation::from(&Method::DELETE), Operation::Delete);

        for method in [
            Method::PATCH,
            Method::POST,
            Method::HEAD,
            Method::OPTIONS,
            Method::from_bytes(b"PURGE").unwrap(),
        ] {
            assert_eq!(Operation::from(&method), Operation::MethodNotAllowed);
        }
    }

    #[test]
    fn test_cache_status_header_values() {
        assert_eq!(CacheStatus::Hit.as_str(), "HIT");
        assert_eq!(CacheStatus::Miss.as_str(), "MISS");
    }
}
