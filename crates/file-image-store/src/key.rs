//! Cache key newtype

use crate::error::StoreError;
use std::fmt;
use std::str::FromStr;

/// Three ASCII digits identifying one cached image, e.g. `404`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusKey([u8; 3]);

impl StatusKey {
    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// File name of the cache entry for this key.
    pub fn file_name(&self) -> String {
        format!("{}.jpg", self.as_str())
    }

    /// Parse a request target of the form `/ddd`.
    ///
    /// Anything after the digits, including a query string, is rejected.
    pub fn from_request_target(target: &str) -> Option<Self> {
        target.strip_prefix('/')?.parse().ok()
    }

    /// Recover a key from a cache entry file name.
    pub fn from_file_name(name: &str) -> Option<Self> {
        name.strip_suffix(".jpg")?.parse().ok()
    }
}

impl FromStr for StatusKey {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [a, b, c] if [a, b, c].iter().all(|d| d.is_ascii_digit()) => {
                Ok(StatusKey([*a, *b, *c]))
            }
            _ => Err(StoreError::InvalidKey(s.to_string())),
        }
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for StatusKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
