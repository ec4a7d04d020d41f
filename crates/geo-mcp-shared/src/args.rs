//! Strict decoding of tool arguments.
//!
//! Tool arguments arrive as untyped JSON. Each tool declares a plain serde
//! struct; [`decode_arguments`] turns a decode failure into an
//! invalid-params protocol error before any upstream call is made.

use schemars::generate::SchemaSettings;
use schemars::JsonSchema;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::protocol::ToolDefinition;

/// Decode `arguments` into `T`, rejecting anything that is not a JSON object.
///
/// Serde would otherwise accept a positional array for a struct.
pub fn decode_arguments<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    if !arguments.is_object() {
        return Err(Error::invalid_params(
            format!("Invalid arguments for {}", tool),
            "arguments must be an object",
        ));
    }
    serde_json::from_value(arguments)
        .map_err(|e| Error::invalid_params(format!("Invalid arguments for {}", tool), e.to_string()))
}

/// `deserialize_with` for optional fields: absent is `None` (via
/// `#[serde(default)]`), but an explicit `null` is a type error.
pub fn non_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// `deserialize_with` for nested structs that must be JSON objects.
pub fn object<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Err(D::Error::custom("expected an object"));
    }
    serde_json::from_value(value).map_err(D::Error::custom)
}

/// Catalog entry whose input schema is generated from `T`.
pub fn tool_definition<T: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let schema = SchemaSettings::draft2020_12()
        .with(|s| s.inline_subschemas = true)
        .into_generator()
        .into_root_schema_for::<T>();

    let mut input_schema = schema.to_value();
    if let Some(obj) = input_schema.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
    }

    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::codes;
    use serde_json::json;

    #[derive(Debug, Deserialize, JsonSchema, PartialEq)]
    struct Point {
        x: f64,
        y: f64,
    }

    #[derive(Debug, Deserialize, JsonSchema, PartialEq)]
    struct Sample {
        /// Required name
        name: String,
        /// Optional note
        #[serde(default, deserialize_with = "non_null")]
        #[schemars(with = "String")]
        note: Option<String>,
        #[serde(deserialize_with = "object")]
        point: Point,
    }

    #[test]
    fn test_decode_valid() {
        let sample: Sample = decode_arguments(
            "sample",
            json!({"name": "a", "point": {"x": 1, "y": 2.5}, "extra": true}),
        )
        .unwrap();
        assert_eq!(sample.name, "a");
        assert!(sample.note.is_none());
        assert_eq!(sample.point, Point { x: 1.0, y: 2.5 });
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        for value in [json!(null), json!("x"), json!(1), json!(["a", null, {"x": 1, "y": 2}])] {
            let err = decode_arguments::<Sample>("sample", value).unwrap_err();
            assert_eq!(err.code, codes::INVALID_PARAMS);
        }
    }

    #[test]
    fn test_decode_rejects_wrong_field_types() {
        let cases = [
            json!({"point": {"x": 1, "y": 2}}),
            json!({"name": 5, "point": {"x": 1, "y": 2}}),
            json!({"name": "a", "note": null, "point": {"x": 1, "y": 2}}),
            json!({"name": "a", "note": 3, "point": {"x": 1, "y": 2}}),
            json!({"name": "a", "point": [1, 2]}),
            json!({"name": "a", "point": {"x": "1", "y": 2}}),
        ];
        for value in cases {
            assert!(decode_arguments::<Sample>("sample", value).is_err());
        }
    }

    #[test]
    fn test_tool_definition_schema() {
        let def = tool_definition::<Sample>("sample", "A sample tool");
        assert_eq!(def.name, "sample");
        let schema = &def.input_schema;
        assert_eq!(schema["type"], "object");
        assert!(schema.get("$schema").is_none());
        assert_eq!(schema["properties"]["note"]["type"], "string");
        assert_eq!(schema["properties"]["point"]["type"], "object");
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(required.contains(&"name"));
        assert!(!required.contains(&"note"));
    }
}
