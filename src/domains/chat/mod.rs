//! Chat domain - conversation with the hosted model.
//!
//! A conversation turn flows through three layers: the HTTP route accepts
//! the message history, the orchestrator runs the tool loop against the
//! registry, and the client speaks the OpenAI-compatible streaming
//! protocol with the configured provider.

pub mod client;
pub mod error;
pub mod postprocess;
pub mod prompt;
pub mod protocol;
pub mod routes;
pub mod service;

pub use client::ModelClient;
pub use error::ChatError;
pub use service::ChatOrchestrator;
