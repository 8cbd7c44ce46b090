//! Functional domains of the server.

pub mod chat;
pub mod todos;
pub mod tools;
