//! Timezone suffixing for transit search responses
//!
//! The upstream reports departure/arrival times without an offset. Only the
//! parts of the body that carry those times are modelled here; everything
//! else rides along in `rest` maps, and any inspected value with an
//! unexpected JSON type (including `null`) is kept as [`Field::Raw`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::with_jst_offset;

/// A field that may be missing, have the expected shape, or hold other JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field<T> {
    #[serde(skip_deserializing)]
    Absent,
    Typed(T),
    Raw(Value),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn typed_mut(&mut self) -> Option<&mut T> {
        match self {
            Field::Typed(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitBody {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub items: Field<Vec<Field<RouteItem>>>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteItem {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub summary: Field<Summary>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub sections: Field<Vec<Field<Section>>>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "move", default, skip_serializing_if = "Field::is_absent")]
    pub movement: Field<TimeSpan>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// `summary.move`: overall departure and arrival of a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub from_time: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub to_time: Field<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "type", default, skip_serializing_if = "Field::is_absent")]
    pub kind: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub from_time: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub to_time: Field<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl TransitBody {
    pub fn apply_offsets(&mut self) {
        if let Some(items) = self.items.typed_mut() {
            for item in items.iter_mut().filter_map(Field::typed_mut) {
                item.apply_offsets();
            }
        }
    }
}

impl RouteItem {
    fn apply_offsets(&mut self) {
        if let Some(span) = self.summary.typed_mut().and_then(|s| s.movement.typed_mut()) {
            suffix(&mut span.from_time);
            suffix(&mut span.to_time);
        }

        if let Some(sections) = self.sections.typed_mut() {
            for section in sections.iter_mut().filter_map(Field::typed_mut) {
                if section.is_move() {
                    suffix(&mut section.from_time);
                    suffix(&mut section.to_time);
                }
            }
        }
    }
}

impl Section {
    pub fn is_move(&self) -> bool {
        matches!(&self.kind, Field::Typed(kind) if kind == "move")
    }
}

fn suffix(field: &mut Field<String>) {
    if let Field::Typed(value) = field {
        *value = with_jst_offset(value);
    }
}

/// Suffix route times with `+09:00`. Non-object bodies pass through untouched.
pub fn normalize(body: Value) -> Result<Value, serde_json::Error> {
    if !body.is_object() {
        return Ok(body);
    }
    let mut parsed: TransitBody = serde_json::from_value(body)?;
    parsed.apply_offsets();
    serde_json::to_value(parsed)
}
