// MCP (Model Context Protocol) server exposing Trello to agent clients

pub mod config;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

#[cfg(test)]
mod testing;

pub use config::{ConfigOverrides, McpConfig};
pub use resources::ResourceProvider;
pub use server::McpServer;
