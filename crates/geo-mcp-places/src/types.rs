//! Tool arguments and upstream query parameters for the three Places tools.

use geo_mcp_shared::args::{non_null, object};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Number;

pub const DEFAULT_LANGUAGE: &str = "ja";

/// Search radius in meters when the caller gives none.
pub const DEFAULT_RADIUS: u64 = 1000;

pub const SEARCH_FIELDS: &str = "place_id,name,formatted_address,geometry,rating,types,opening_hours";

pub const DETAILS_FIELDS: &str = "place_id,name,formatted_address,formatted_phone_number,website,url,geometry,rating,user_ratings_total,price_level,opening_hours,reviews,types";

fn language_or_default(language: &Option<String>) -> String {
    language
        .clone()
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

/// Input for the search_places tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct PlacesSearchArgs {
    /// Free-text query, e.g. "Tokyo Tower"
    pub query: String,

    /// Response language (default: "ja")
    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String")]
    pub language: Option<String>,
}

/// Input for the get_place_details tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct PlaceDetailsArgs {
    /// Google place ID, as returned by search_places
    #[serde(rename = "placeId")]
    pub place_id: String,

    /// Response language (default: "ja")
    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String")]
    pub language: Option<String>,
}

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, JsonSchema)]
pub struct LatLng {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

/// Input for the nearby_search tool
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct NearbySearchArgs {
    /// Center of the search
    #[serde(deserialize_with = "object")]
    pub location: LatLng,

    /// Search radius in meters (default: 1000)
    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "f64")]
    pub radius: Option<Number>,

    /// Restrict results to one place type, e.g. "restaurant"
    #[serde(rename = "type", default, deserialize_with = "non_null")]
    #[schemars(with = "String")]
    pub place_type: Option<String>,

    /// Response language (default: "ja")
    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String")]
    pub language: Option<String>,
}

/// Query string for `/findplacefromtext/json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    pub input: String,
    pub inputtype: &'static str,
    pub fields: &'static str,
    pub language: String,
}

/// Query string for `/details/json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsParams {
    pub place_id: String,
    pub fields: &'static str,
    pub language: String,
}

/// Query string for `/nearbysearch/json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NearbyParams {
    /// `"{lat},{lng}"`
    pub location: String,
    pub radius: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
    pub language: String,
}

impl PlacesSearchArgs {
    pub fn to_params(&self) -> SearchParams {
        SearchParams {
            input: self.query.clone(),
            inputtype: "textquery",
            fields: SEARCH_FIELDS,
            language: language_or_default(&self.language),
        }
    }
}

impl PlaceDetailsArgs {
    pub fn to_params(&self) -> DetailsParams {
        DetailsParams {
            place_id: self.place_id.clone(),
            fields: DETAILS_FIELDS,
            language: language_or_default(&self.language),
        }
    }
}

/// Render a number the way the Places web clients do: integral values
/// without a fraction, `-0` as `0`, and exponent notation below `1e-6` or
/// from `1e21` up.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

fn format_json_number(value: &Number) -> String {
    match value.as_f64() {
        Some(float) if value.is_f64() => format_number(float),
        _ => value.to_string(),
    }
}

impl LatLng {
    /// `lat,lng` as sent to the nearby search endpoint.
    pub fn to_query(&self) -> String {
        format!("{},{}", format_number(self.lat), format_number(self.lng))
    }
}

impl NearbySearchArgs {
    pub fn to_params(&self) -> NearbyParams {
        NearbyParams {
            location: self.location.to_query(),
            radius: self
                .radius
                .as_ref()
                .map(format_json_number)
                .unwrap_or_else(|| DEFAULT_RADIUS.to_string()),
            place_type: self.place_type.clone(),
            language: language_or_default(&self.language),
        }
    }
}
