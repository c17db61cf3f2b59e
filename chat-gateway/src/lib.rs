//! chat-gateway: answers questions over HTTP through an LLM chat-completion
//! provider, or a local mock when running offline.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
