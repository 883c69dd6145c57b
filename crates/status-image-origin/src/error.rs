//! Error types for the origin client

use std::fmt;

#[derive(Debug)]
pub enum OriginError {
    Http(Box<reqwest::Error>),
    Status(u16),
    InvalidBaseUrl(String),
}

impl fmt::Display for OriginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginError::Http(err) => write!(f, "HTTP error: {}", err),
            OriginError::Status(code) => write!(f, "Origin returned status {}", code),
            OriginError::InvalidBaseUrl(msg) => write!(f, "Invalid origin URL: {}", msg),
        }
    }
}

impl std::error::Error for OriginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OriginError::Http(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OriginError {
    fn from(err: reqwest::Error) -> Self {
        OriginError::Http(Box::new(err))
    }
}

impl From<url::ParseError> for OriginError {
    fn from(err: url::ParseError) -> Self {
        OriginError::InvalidBaseUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OriginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = OriginError::Status(502);
        assert_eq!(format!("{}", err), "Origin returned status 502");
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let err: OriginError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, OriginError::InvalidBaseUrl(_)));
        assert!(err.to_string().starts_with("Invalid origin URL"));
    }
}
