pub mod chat;
pub mod health;

pub use chat::{ChatRequest, ChatResponse};
pub use health::HealthResponse;
