//! # authhub-api
//!
//! HTTP API layer for AuthHub: routes, handlers, DTOs, the bearer-token
//! extractor, and the mapping from domain errors to HTTP responses.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
