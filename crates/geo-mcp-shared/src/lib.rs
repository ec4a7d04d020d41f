//! Shared plumbing for the geo MCP servers.
//!
//! The three servers (directions, transit, places) are thin handlers over
//! this crate:
//!
//! - `args`: strict decoding of tool arguments and schema generation
//! - `protocol`: JSON-RPC envelopes and MCP tool/resource types
//! - `transport`: newline-delimited JSON over stdin/stdout
//! - `server`: the [`McpHandler`] trait and the request loop
//! - `http`: the upstream API client and its error type
//! - `error`: protocol-level errors sent back as JSON-RPC errors
//! - `config` / `logging`: startup configuration and stderr logging
//!
//! ```text
//! stdin ─▶ transport ─▶ server::dispatch ─▶ McpHandler::call_tool
//!                                             ├─ decode arguments
//!                                             ├─ translate to query params
//!                                             └─ ApiClient::get_json ─▶ upstream
//! ```

pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod protocol;
pub mod server;
pub mod transport;

pub use args::{decode_arguments, tool_definition};
pub use config::{optional_env, require_env, ConfigError, ServeArgs};
pub use error::{Error, Result};
pub use http::{ApiAuth, ApiClient, UpstreamError};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use protocol::{
    ReadResourceResult, Resource, ResourceTemplate, ServerCapabilities, ServerInfo, ToolCall,
    ToolDefinition, ToolResult,
};
pub use server::{handle_message, run_server_loop, shutdown_signal, McpHandler};
pub use transport::{StdioTransport, TransportError};
