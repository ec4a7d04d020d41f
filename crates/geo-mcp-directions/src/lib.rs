//! MCP server for Google Maps directions
//!
//! Exposes one tool, `get_directions`, plus a `directions://{origin}/{destination}`
//! resource template. Both issue a single GET to the Google Maps Directions
//! API and hand back its JSON body.
//!
//! # Transport
//!
//! The server speaks newline-delimited JSON-RPC 2.0 on stdio. All logging
//! goes to stderr to keep stdout clean for the protocol.

pub mod config;
pub mod resources;
pub mod server;
pub mod types;

pub use config::DirectionsConfig;
pub use server::{DirectionsRequest, DirectionsServer};
pub use types::{DirectionsArgs, DirectionsParams};
