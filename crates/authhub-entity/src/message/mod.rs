//! Mailbox message domain entities.

pub mod model;

pub use model::{Message, NewMessage, PrincipalRef};
