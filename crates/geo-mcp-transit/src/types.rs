//! Tool arguments and upstream query parameters for transit route search.

use geo_mcp_shared::args::non_null;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Offset appended to timestamps that carry no zone of their own.
pub const JST_OFFSET: &str = "+09:00";

/// Departure time used when the caller gives none.
pub const DEFAULT_START_TIME: &str = "2024-02-11T12:00:00+09:00";

pub const DEFAULT_TERM: &str = "60";
pub const DEFAULT_LIMIT: &str = "3";
pub const DEFAULT_DATUM: &str = "wgs84";
pub const DEFAULT_COORD_UNIT: &str = "degree";

/// Append [`JST_OFFSET`] unless the value already contains a `+`.
///
/// This is a textual check, not a timezone parser: a `+` anywhere in the
/// string counts as "already zoned", and negative offsets are not recognized.
pub fn with_jst_offset(value: &str) -> String {
    if value.contains('+') {
        value.to_string()
    } else {
        format!("{}{}", value, JST_OFFSET)
    }
}

/// Input for the search_transit_route tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct TransitArgs {
    /// Departure point as "lat,lng" or a NAVITIME spot code
    pub start: String,

    /// Arrival point as "lat,lng" or a NAVITIME spot code
    pub goal: String,

    /// Departure time, e.g. "2024-02-11T12:00:00"; +09:00 is appended when no offset is given
    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String")]
    pub start_time: Option<String>,

    /// Search window in minutes (default: "60")
    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String")]
    pub term: Option<String>,

    /// Maximum number of routes (default: "3")
    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String")]
    pub limit: Option<String>,

    /// Geodetic datum of coordinates: "wgs84" or "tokyo" (default: "wgs84")
    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String")]
    pub datum: Option<String>,

    /// Coordinate unit: "degree" or "millisec" (default: "degree")
    #[serde(default, deserialize_with = "non_null")]
    #[schemars(with = "String")]
    pub coord_unit: Option<String>,
}

/// Query string sent to `/route_transit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitParams {
    pub start: String,
    pub goal: String,
    pub start_time: String,
    pub term: String,
    pub limit: String,
    pub datum: String,
    pub coord_unit: String,
}

impl TransitArgs {
    pub fn to_params(&self) -> TransitParams {
        let or_default = |value: &Option<String>, default: &str| {
            value.clone().unwrap_or_else(|| default.to_string())
        };

        TransitParams {
            start: self.start.clone(),
            goal: self.goal.clone(),
            start_time: self
                .start_time
                .as_deref()
                .map(with_jst_offset)
                .unwrap_or_else(|| DEFAULT_START_TIME.to_string()),
            term: or_default(&self.term, DEFAULT_TERM),
            limit: or_default(&self.limit, DEFAULT_LIMIT),
            datum: or_default(&self.datum, DEFAULT_DATUM),
            coord_unit: or_default(&self.coord_unit, DEFAULT_COORD_UNIT),
        }
    }
}
