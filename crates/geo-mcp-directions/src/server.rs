use geo_mcp_shared::{
    decode_arguments, tool_definition, ApiAuth, ApiClient, ConfigError, Error, McpHandler,
    ReadResourceResult, Resource, ResourceTemplate, Result, ServerCapabilities, ServerInfo,
    ToolCall, ToolDefinition, ToolResult, UpstreamError,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::DirectionsConfig;
use crate::resources;
use crate::types::{DirectionsArgs, DirectionsParams};

pub const SERVER_NAME: &str = "geo-mcp-directions";

pub const GET_DIRECTIONS: &str = "get_directions";

const DIRECTIONS_PATH: &str = "/directions/json";

/// Prefix for upstream failure messages.
const PROVIDER: &str = "Google Maps";

/// A decoded `tools/call` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectionsRequest {
    GetDirections(DirectionsArgs),
}

impl DirectionsRequest {
    pub fn decode(call: ToolCall) -> Result<Self> {
        match call.name.as_str() {
            GET_DIRECTIONS => Ok(Self::GetDirections(decode_arguments(
                GET_DIRECTIONS,
                call.arguments,
            )?)),
            other => Err(Error::unknown_tool(other)),
        }
    }
}

/// Directions server state: one upstream client, never mutated after startup.
pub struct DirectionsServer {
    client: ApiClient,
}

impl DirectionsServer {
    pub fn new(config: DirectionsConfig) -> std::result::Result<Self, ConfigError> {
        info!(base_url = %config.base_url, "configuring Google Maps Directions client");
        let client = ApiClient::new(config.base_url, ApiAuth::query_key("key", config.api_key))?;
        Ok(Self { client })
    }

    /// One GET to the Directions API.
    pub async fn directions(
        &self,
        params: &DirectionsParams,
    ) -> std::result::Result<Value, UpstreamError> {
        self.client.get_json(DIRECTIONS_PATH, params).await
    }
}

impl McpHandler for DirectionsServer {
    fn server_info(&self) -> ServerInfo {
        ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn capabilities(&self) -> ServerCapabilities {
        ServerCapabilities::tools_and_resources()
    }

    fn list_tools(&self) -> Vec<ToolDefinition> {
        vec![tool_definition::<DirectionsArgs>(
            GET_DIRECTIONS,
            "Get directions between two locations using the Google Maps Directions API",
        )]
    }

    async fn call_tool(&self, call: ToolCall) -> Result<ToolResult> {
        match DirectionsRequest::decode(call)? {
            DirectionsRequest::GetDirections(args) => {
                info!(origin = %args.origin, destination = %args.destination, "get_directions");
                match self.directions(&args.to_params()).await {
                    Ok(body) => ToolResult::json(&body),
                    Err(e) => {
                        warn!(error = %e, "directions lookup failed");
                        Ok(ToolResult::error(format!("{} API error: {}", PROVIDER, e)))
                    }
                }
            }
        }
    }

    fn list_resources(&self) -> Result<Vec<Resource>> {
        Ok(resources::resources())
    }

    fn list_resource_templates(&self) -> Result<Vec<ResourceTemplate>> {
        Ok(resources::resource_templates())
    }

    async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult> {
        let params = resources::parse_directions_uri(uri)?;
        let body = self
            .directions(&params)
            .await
            .map_err(|e| Error::internal(format!("{} API error: {}", PROVIDER, e)))?;
        ReadResourceResult::json(uri, &body)
    }
}
