//! # Playlist Proxy Library
//!
//! Serves simplified playlist endpoints over the Spotify Web API, hiding its
//! client-credentials flow, cursor pagination and error shapes from callers.
//!
//! Modules:
//! - `config`: service configuration, upstream settings and validation
//! - `cache`: process-wide bearer token cache
//! - `sources`: token exchange, authenticated fetches and the cursor pager
//! - `parser`: identifier validation and token response parsing
//! - `errors`: failure taxonomy and normalization into one error envelope
//! - `server`: axum routes exposing the resources

pub mod cache;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod model;
pub mod observability;
pub mod parser;
pub mod server;
pub mod sources;
pub mod utils;
#[cfg(test)]
mod tests;


pub use crate::config::upstream::{ConfigProvider, ServiceConfig, UpstreamConfig};
pub use crate::errors::{normalize, Failure, NormalizedError};
