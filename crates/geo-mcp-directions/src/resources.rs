//! `directions://{origin}/{destination}` resources
//!
//! A resource read runs the same upstream lookup as the tool, but without
//! a travel mode, and failures surface as protocol errors instead of
//! error-flagged tool results.

use geo_mcp_shared::{Error, Resource, ResourceTemplate, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::DirectionsParams;

pub const URI_TEMPLATE: &str = "directions://{origin}/{destination}";

pub const EXAMPLE_URI: &str = "directions://Tokyo%20Station/Osaka%20Station";

const MIME_TYPE: &str = "application/json";

static DIRECTIONS_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^directions://([^/]+)/([^/]+)$").expect("directions URI pattern"));

/// Resources listed by `resources/list`
pub fn resources() -> Vec<Resource> {
    vec![Resource {
        uri: EXAMPLE_URI.to_string(),
        name: "Example route: Tokyo Station to Osaka Station".to_string(),
        description: Some("Driving directions between Tokyo Station and Osaka Station".to_string()),
        mime_type: Some(MIME_TYPE.to_string()),
    }]
}

/// Templates listed by `resources/templates/list`
pub fn resource_templates() -> Vec<ResourceTemplate> {
    vec![ResourceTemplate {
        uri_template: URI_TEMPLATE.to_string(),
        name: "Directions between two places".to_string(),
        description: Some(
            "Route from origin to destination; both segments are URL-encoded place names or addresses"
                .to_string(),
        ),
        mime_type: Some(MIME_TYPE.to_string()),
    }]
}

/// Split a resource URI into percent-decoded origin and destination.
pub fn parse_directions_uri(uri: &str) -> Result<DirectionsParams> {
    let captures = DIRECTIONS_URI
        .captures(uri)
        .ok_or_else(|| Error::invalid_request(format!("Invalid URI format: {}", uri)))?;

    let decode = |segment: &str| {
        urlencoding::decode(segment)
            .map(|s| s.into_owned())
            .map_err(|e| Error::invalid_request(format!("Invalid URI format: {} ({})", uri, e)))
    };

    Ok(DirectionsParams {
        origin: decode(&captures[1])?,
        destination: decode(&captures[2])?,
        mode: None,
    })
}
