//! Todo Chat Server Library
//!
//! This crate provides a todo-list web service with an LLM-backed chat
//! assistant, organized with a modular architecture by domains.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, and the HTTP server
//! - **domains**: Business logic organized by bounded contexts
//!   - **todos**: Todo persistence, validation, and the REST surface
//!   - **tools**: Operations the model may invoke, with their schemas
//!   - **chat**: Conversation orchestration against a hosted model
//!
//! # Example
//!
//! ```rust,no_run
//! use todo_chat_server::core::{AppServer, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = AppServer::from_config(config)?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{AppServer, Config, Error, Result};
