use geo_mcp_shared::{
    decode_arguments, tool_definition, ApiAuth, ApiClient, ConfigError, Error, McpHandler, Result,
    ServerInfo, ToolCall, ToolDefinition, ToolResult, UpstreamError,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::TransitConfig;
use crate::normalize::normalize;
use crate::types::{TransitArgs, TransitParams};

pub const SERVER_NAME: &str = "geo-mcp-transit";

pub const SEARCH_TRANSIT_ROUTE: &str = "search_transit_route";

const ROUTE_TRANSIT_PATH: &str = "/route_transit";

/// Prefix for upstream failure messages.
const PROVIDER: &str = "NAVITIME";

/// A decoded `tools/call` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitRequest {
    SearchTransitRoute(TransitArgs),
}

impl TransitRequest {
    pub fn decode(call: ToolCall) -> Result<Self> {
        match call.name.as_str() {
            SEARCH_TRANSIT_ROUTE => Ok(Self::SearchTransitRoute(decode_arguments(
                SEARCH_TRANSIT_ROUTE,
                call.arguments,
            )?)),
            other => Err(Error::unknown_tool(other)),
        }
    }
}

pub struct TransitServer {
    client: ApiClient,
}

impl TransitServer {
    pub fn new(config: TransitConfig) -> std::result::Result<Self, ConfigError> {
        info!(base_url = %config.base_url, host = %config.api_host, "configuring RapidAPI transit client");
        let auth = ApiAuth::headers([
            ("X-RapidAPI-Key", config.api_key.as_str()),
            ("X-RapidAPI-Host", config.api_host.as_str()),
        ])?;
        let client = ApiClient::new(config.base_url, auth)?;
        Ok(Self { client })
    }

    /// One GET to the route search endpoint; the body is returned as received.
    pub async fn search(&self, params: &TransitParams) -> std::result::Result<Value, UpstreamError> {
        self.client.get_json(ROUTE_TRANSIT_PATH, params).await
    }
}

impl McpHandler for TransitServer {
    fn server_info(&self) -> ServerInfo {
        ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn list_tools(&self) -> Vec<ToolDefinition> {
        vec![tool_definition::<TransitArgs>(
            SEARCH_TRANSIT_ROUTE,
            "Search public transit routes between two points in Japan using the NAVITIME Route API. \
             Times in the response carry a +09:00 offset.",
        )]
    }

    async fn call_tool(&self, call: ToolCall) -> Result<ToolResult> {
        match TransitRequest::decode(call)? {
            TransitRequest::SearchTransitRoute(args) => {
                let params = args.to_params();
                info!(start = %params.start, goal = %params.goal, start_time = %params.start_time, "search_transit_route");
                match self.search(&params).await {
                    Ok(body) => ToolResult::json(&normalize(body)?),
                    Err(e) => {
                        warn!(error = %e, "transit search failed");
                        Ok(ToolResult::error(format!("{} API error: {}", PROVIDER, e)))
                    }
                }
            }
        }
    }
}
