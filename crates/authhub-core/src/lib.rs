//! # authhub-core
//!
//! Core crate for AuthHub. Contains configuration schemas, the duration
//! string parser, the injectable clock abstraction, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other AuthHub crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod result;

pub use clock::{Clock, SystemClock};
pub use error::{AppError, ErrorKind};
pub use result::AppResult;
