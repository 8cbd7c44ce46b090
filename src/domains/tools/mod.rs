//! Tools domain module.
//!
//! Named, schema-validated operations the chat model may invoke during a
//! turn. Every tool wraps the todo service; none of them touch storage
//! directly.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Central tool registry and dispatch
//! - `outcome.rs` - The uniform `{success, data|error}` result envelope
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define a params struct and `execute()`
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs` (`tool_names`, `model_tools`, `call`)

pub mod definitions;
mod outcome;
mod registry;

pub use outcome::ToolOutcome;
pub use registry::ToolRegistry;
