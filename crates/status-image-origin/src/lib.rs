//! Status image origin
//!
//! Fetches the image for a status code from an upstream HTTP origin
//! (`GET <base>/<key>`). Used only when the local cache has no entry.

pub mod error;
pub mod origin;

pub use error::{OriginError, Result};
pub use origin::{HttpOrigin, ImageOrigin, DEFAULT_ORIGIN_URL};
