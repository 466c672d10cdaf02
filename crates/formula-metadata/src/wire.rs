//! JSON encoding of [`SpreadsheetMetadata`].
//!
//! One field per local property, named exactly as the property and written in sort order.
//! Defaults, when present, are nested under [`DEFAULTS_FIELD`]. Unknown field names are rejected.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

use crate::error::{MetadataError, Result};
use crate::metadata::SpreadsheetMetadata;
use crate::property::PropertyName;

/// Reserved field holding the defaults metadata. Property names start with a letter, so it cannot
/// collide with one.
pub const DEFAULTS_FIELD: &str = "_defaults";

impl SpreadsheetMetadata {
    pub fn to_json(&self) -> JsonValue {
        let mut obj = Map::new();
        for (name, value) in self.entries() {
            obj.insert(name.name().to_string(), value.to_json());
        }
        if let Some(defaults) = self.defaults() {
            obj.insert(DEFAULTS_FIELD.to_string(), defaults.to_json());
        }
        JsonValue::Object(obj)
    }

    pub fn from_json(node: &JsonValue) -> Result<Self> {
        let obj = node
            .as_object()
            .ok_or_else(|| MetadataError::InvalidJson(format!("expected an object, got {node}")))?;

        let mut entries = Vec::with_capacity(obj.len());
        let mut defaults = None;
        for (field, value) in obj {
            if field == DEFAULTS_FIELD {
                defaults = Some(Self::from_json(value)?);
                continue;
            }
            let name = PropertyName::named(field)?;
            let value = name.unmarshall(value)?;
            entries.push((name, value));
        }

        let metadata = Self::with(entries)?;
        match defaults {
            Some(defaults) => metadata.set_defaults(&defaults),
            None => Ok(metadata),
        }
    }

    /// Parse metadata from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        let node: JsonValue = serde_json::from_str(text)?;
        Self::from_json(&node)
    }
}

impl Serialize for SpreadsheetMetadata {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in self.entries() {
            map.serialize_entry(name.name(), &value.to_json())?;
        }
        if let Some(defaults) = self.defaults() {
            map.serialize_entry(DEFAULTS_FIELD, defaults)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SpreadsheetMetadata {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let node = JsonValue::deserialize(deserializer)?;
        Self::from_json(&node).map_err(D::Error::custom)
    }
}
