// MCP (Model Context Protocol) server exposing the Reddit and events tools
// to agent clients over JSON-RPC 2.0

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
pub use tools::{build_registry, Tool, ToolRegistry};
