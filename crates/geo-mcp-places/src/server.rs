use geo_mcp_shared::{
    decode_arguments, tool_definition, ApiAuth, ApiClient, ConfigError, Error, McpHandler, Result,
    ServerInfo, ToolCall, ToolDefinition, ToolResult, UpstreamError,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::PlacesConfig;
use crate::types::{NearbySearchArgs, PlaceDetailsArgs, PlacesSearchArgs};

pub const SERVER_NAME: &str = "geo-mcp-places";

pub const SEARCH_PLACES: &str = "search_places";
pub const GET_PLACE_DETAILS: &str = "get_place_details";
pub const NEARBY_SEARCH: &str = "nearby_search";

const FIND_PLACE_PATH: &str = "/findplacefromtext/json";
const DETAILS_PATH: &str = "/details/json";
const NEARBY_SEARCH_PATH: &str = "/nearbysearch/json";

/// Prefix for upstream failure messages.
const PROVIDER: &str = "Google Places";

/// A decoded `tools/call` request; the tool name selects the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacesRequest {
    Search(PlacesSearchArgs),
    Details(PlaceDetailsArgs),
    Nearby(NearbySearchArgs),
}

impl PlacesRequest {
    pub fn decode(call: ToolCall) -> Result<Self> {
        let ToolCall { name, arguments } = call;
        match name.as_str() {
            SEARCH_PLACES => Ok(Self::Search(decode_arguments(SEARCH_PLACES, arguments)?)),
            GET_PLACE_DETAILS => Ok(Self::Details(decode_arguments(GET_PLACE_DETAILS, arguments)?)),
            NEARBY_SEARCH => Ok(Self::Nearby(decode_arguments(NEARBY_SEARCH, arguments)?)),
            other => Err(Error::unknown_tool(other)),
        }
    }
}

pub struct PlacesServer {
    client: ApiClient,
}

impl PlacesServer {
    pub fn new(config: PlacesConfig) -> std::result::Result<Self, ConfigError> {
        info!(base_url = %config.base_url, "configuring Google Places client");
        let client = ApiClient::new(config.base_url, ApiAuth::query_key("key", config.api_key))?;
        Ok(Self { client })
    }

    async fn fetch<P: Serialize>(&self, path: &str, params: &P) -> std::result::Result<Value, UpstreamError> {
        self.client.get_json(path, params).await
    }

    async fn run(&self, request: PlacesRequest) -> std::result::Result<Value, UpstreamError> {
        match request {
            PlacesRequest::Search(args) => {
                info!(query = %args.query, "search_places");
                self.fetch(FIND_PLACE_PATH, &args.to_params()).await
            }
            PlacesRequest::Details(args) => {
                info!(place_id = %args.place_id, "get_place_details");
                self.fetch(DETAILS_PATH, &args.to_params()).await
            }
            PlacesRequest::Nearby(args) => {
                let params = args.to_params();
                info!(location = %params.location, radius = %params.radius, "nearby_search");
                self.fetch(NEARBY_SEARCH_PATH, &params).await
            }
        }
    }
}

impl McpHandler for PlacesServer {
    fn server_info(&self) -> ServerInfo {
        ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn list_tools(&self) -> Vec<ToolDefinition> {
        vec![
            tool_definition::<PlacesSearchArgs>(
                SEARCH_PLACES,
                "Find places matching a text query using the Google Places API",
            ),
            tool_definition::<PlaceDetailsArgs>(
                GET_PLACE_DETAILS,
                "Get details (address, phone, hours, reviews) for a Google place ID",
            ),
            tool_definition::<NearbySearchArgs>(
                NEARBY_SEARCH,
                "Search for places within a radius of a coordinate using the Google Places API",
            ),
        ]
    }

    async fn call_tool(&self, call: ToolCall) -> Result<ToolResult> {
        let request = PlacesRequest::decode(call)?;
        match self.run(request).await {
            Ok(body) => ToolResult::json(&body),
            Err(e) => {
                warn!(error = %e, "places lookup failed");
                Ok(ToolResult::error(format!("{} API error: {}", PROVIDER, e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_mcp_shared::error::codes;
    use serde_json::json;

    fn call(name: &str, arguments: Value) -> ToolCall {
        ToolCall {
            name: name.to_string(),
            arguments,
        }
    }

    #[test]
    fn test_decode_selects_variant_by_name() {
        assert!(matches!(
            PlacesRequest::decode(call(SEARCH_PLACES, json!({"query": "ramen"}))),
            Ok(PlacesRequest::Search(_))
        ));
        assert!(matches!(
            PlacesRequest::decode(call(GET_PLACE_DETAILS, json!({"placeId": "abc"}))),
            Ok(PlacesRequest::Details(_))
        ));
        assert!(matches!(
            PlacesRequest::decode(call(NEARBY_SEARCH, json!({"location": {"lat": 1, "lng": 2}}))),
            Ok(PlacesRequest::Nearby(_))
        ));
    }

    #[test]
    fn test_decode_errors() {
        let err = PlacesRequest::decode(call("bogus_tool", json!({}))).unwrap_err();
        assert_eq!(err.code, codes::METHOD_NOT_FOUND);
        assert_eq!(err.message, "Unknown tool: bogus_tool");

        // Arguments for one tool do not satisfy another
        let err = PlacesRequest::decode(call(GET_PLACE_DETAILS, json!({"query": "ramen"}))).unwrap_err();
        assert_eq!(err.code, codes::INVALID_PARAMS);
    }

    #[test]
    fn test_tool_catalog() {
        let server = PlacesServer::new(PlacesConfig::new("test-key")).unwrap();
        let tools = server.list_tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, [SEARCH_PLACES, GET_PLACE_DETAILS, NEARBY_SEARCH]);

        let nearby = &tools[2].input_schema;
        assert_eq!(nearby["properties"]["location"]["type"], "object");
        assert_eq!(nearby["properties"]["radius"]["type"], "number");
        assert!(nearby["properties"].get("type").is_some());
        assert_eq!(nearby["required"], json!(["location"]));
    }
}
