//! Prompt, tool and resource catalogs and their handlers
//!
//! Provides the code-assistant functionality exposed over the MCP protocol

pub mod prompts;
pub mod resources;
pub mod tools;
pub mod utils;
