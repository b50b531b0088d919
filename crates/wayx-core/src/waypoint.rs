//! Waypoint records and their derivation from per-file source objects.
//!
//! A source is any JSON object carrying a string `name` and a `position`
//! array whose first three elements are numbers; other fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Color stamped on every waypoint: opaque white (0xFFFFFFFF).
pub const WAYPOINT_COLOR: u32 = 4294967295;

/// Prefix prepended to the source name.
pub const NAME_PREFIX: &str = "Waypoints ";

/// Output record. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub color: u32,
    pub name: String,
    pub x: Number,
    pub y: Number,
    pub z: Number,
}

/// Why a parsed JSON value is not a usable source record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("top-level value is not an object")]
    NotAnObject,
    #[error("missing required key(s): {}", .keys.join(", "))]
    MissingKeys { keys: Vec<&'static str> },
    #[error("`name` is not a string")]
    InvalidName,
    #[error("`position` {reason}")]
    InvalidPosition { reason: &'static str },
}

/// Validated view of a source object.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord<'a> {
    pub name: &'a str,
    pub position: [&'a Number; 3],
}

impl<'a> SourceRecord<'a> {
    /// Validates `value` against the source schema.
    pub fn from_value(value: &'a Value) -> Result<Self, SchemaError> {
        let obj = value.as_object().ok_or(SchemaError::NotAnObject)?;
        check_required(obj)?;

        let name = obj["name"].as_str().ok_or(SchemaError::InvalidName)?;
        let items = obj["position"]
            .as_array()
            .ok_or(SchemaError::InvalidPosition {
                reason: "is not an array",
            })?;
        if items.len() < 3 {
            return Err(SchemaError::InvalidPosition {
                reason: "has fewer than three coordinates",
            });
        }
        Ok(SourceRecord {
            name,
            position: [coord(items, 0)?, coord(items, 1)?, coord(items, 2)?],
        })
    }

    /// Builds the output waypoint with the given prefix and color.
    pub fn to_waypoint(&self, name_prefix: &str, color: u32) -> Waypoint {
        let [x, y, z] = self.position;
        Waypoint {
            color,
            name: format!("{}{}", name_prefix, self.name),
            x: x.clone(),
            y: y.clone(),
            z: z.clone(),
        }
    }
}

fn coord(items: &[Value], i: usize) -> Result<&Number, SchemaError> {
    match &items[i] {
        Value::Number(n) => Ok(n),
        _ => Err(SchemaError::InvalidPosition {
            reason: "contains a non-numeric coordinate",
        }),
    }
}

fn check_required(obj: &Map<String, Value>) -> Result<(), SchemaError> {
    let keys: Vec<&'static str> = ["name", "position"]
        .into_iter()
        .filter(|k| !obj.contains_key(*k))
        .collect();
    if keys.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingKeys { keys })
    }
}

impl Waypoint {
    /// Derives a waypoint with the default prefix and color.
    pub fn from_source(value: &Value) -> Result<Self, SchemaError> {
        Ok(SourceRecord::from_value(value)?.to_waypoint(NAME_PREFIX, WAYPOINT_COLOR))
    }
}
