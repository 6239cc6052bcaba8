//! Model Context Protocol dispatching and JSON-RPC envelopes
//!
//! Provides protocol-level routing, capability reporting and response formatting.

pub mod rpc;
pub mod server;
