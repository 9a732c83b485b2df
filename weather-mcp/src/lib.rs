//! MCP server exposing the `get-weather` tool over a stateless streamable-HTTP
//! endpoint.
//!
//! This crate focuses on:
//! - Dispatching MCP methods to the tool, on `rmcp` wire types
//! - The HTTP endpoint and its error envelopes
//!
//! The lookup itself lives in `weather-core`.

pub mod error;
pub mod http;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use server::McpServer;
