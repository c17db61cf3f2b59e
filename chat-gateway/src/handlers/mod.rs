//! HTTP handlers for the chat gateway.

pub mod chat;
pub mod health;
pub mod root;

pub use chat::chat;
pub use health::health_check;
pub use root::{index, not_found};
