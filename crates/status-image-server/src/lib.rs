//! Status image server library
//!
//! Serves status-code images from a local cache directory, fetching misses
//! from an upstream origin and writing them through to the cache.

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use config::Config;
pub use error::{ApiError, Result, ServerError};
pub use server::{create_router, serve, start_server, ServerState, SharedState};
