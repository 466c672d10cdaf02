use core::fmt;

use serde_json::{json, Value as JsonValue};

use crate::address::{CellRange, CellReference};
use crate::color::Color;
use crate::document::{AuditInfo, SpreadsheetId, Viewport};
use crate::error::PropertyValueError;
use crate::locale::LocaleTag;
use crate::number::{ExpressionNumberKind, RoundingMode};
use crate::plugins::{AliasSet, PluginNameSet};
use crate::selector::Selector;

/// A validated property value.
///
/// Every property stores one variant; which one is fixed by the property's [`ValueKind`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    Bool(bool),
    Char(char),
    U32(u32),
    I64(i64),
    Text(String),
    Color(Color),
    Locale(LocaleTag),
    RoundingMode(RoundingMode),
    ExpressionNumberKind(ExpressionNumberKind),
    Selector(Selector),
    PluginNames(PluginNameSet),
    Aliases(AliasSet),
    SpreadsheetId(SpreadsheetId),
    AuditInfo(AuditInfo),
    Viewport(Viewport),
}

impl PropertyValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Char(_) => ValueKind::Char,
            Self::U32(_) => ValueKind::U32,
            Self::I64(_) => ValueKind::I64,
            Self::Text(_) => ValueKind::Text,
            Self::Color(_) => ValueKind::Color,
            Self::Locale(_) => ValueKind::Locale,
            Self::RoundingMode(_) => ValueKind::RoundingMode,
            Self::ExpressionNumberKind(_) => ValueKind::ExpressionNumberKind,
            Self::Selector(_) => ValueKind::Selector,
            Self::PluginNames(_) => ValueKind::PluginNames,
            Self::Aliases(_) => ValueKind::Aliases,
            Self::SpreadsheetId(_) => ValueKind::SpreadsheetId,
            Self::AuditInfo(_) => ValueKind::AuditInfo,
            Self::Viewport(_) => ValueKind::Viewport,
        }
    }

    /// Wire encoding of this value.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Bool(v) => JsonValue::Bool(*v),
            Self::Char(v) => JsonValue::String(v.to_string()),
            Self::U32(v) => json!(v),
            Self::I64(v) => json!(v),
            Self::Text(v) => JsonValue::String(v.clone()),
            Self::Color(v) => JsonValue::String(v.to_hex()),
            Self::Locale(v) => JsonValue::String(v.to_string()),
            Self::RoundingMode(v) => JsonValue::String(v.as_str().to_string()),
            Self::ExpressionNumberKind(v) => JsonValue::String(v.as_str().to_string()),
            Self::Selector(v) => JsonValue::String(v.to_string()),
            Self::PluginNames(v) => JsonValue::String(v.to_string()),
            Self::Aliases(v) => JsonValue::String(v.to_string()),
            Self::SpreadsheetId(v) => JsonValue::String(v.to_string()),
            Self::AuditInfo(v) => {
                serde_json::to_value(v).expect("audit info fields always serialize")
            }
            Self::Viewport(v) => {
                let mut obj = serde_json::Map::new();
                obj.insert("home".to_string(), JsonValue::String(v.home().to_a1()));
                if let Some(selection) = v.selection() {
                    obj.insert(
                        "selection".to_string(),
                        JsonValue::String(selection.to_string()),
                    );
                }
                JsonValue::Object(obj)
            }
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            JsonValue::String(s) => f.write_str(&s),
            other => write!(f, "{other}"),
        }
    }
}

/// The value handler for one wire-value kind.
///
/// Handlers are stateless: they type-check a [`PropertyValue`], apply the constraints intrinsic to
/// the kind, and convert to/from JSON. Property-specific constraints (ranges, normalization) live
/// on the property itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Char,
    U32,
    I64,
    /// Non-empty text.
    Text,
    Color,
    Locale,
    RoundingMode,
    ExpressionNumberKind,
    Selector,
    PluginNames,
    Aliases,
    SpreadsheetId,
    AuditInfo,
    Viewport,
}

impl ValueKind {
    /// Human-readable description used in validation errors.
    pub fn expected(self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Char => "single character",
            Self::U32 => "non-negative integer",
            Self::I64 => "integer",
            Self::Text => "non-empty text",
            Self::Color => "color (#RRGGBB)",
            Self::Locale => "locale tag",
            Self::RoundingMode => "rounding mode",
            Self::ExpressionNumberKind => "expression number kind",
            Self::Selector => "selector",
            Self::PluginNames => "plugin name set",
            Self::Aliases => "alias set",
            Self::SpreadsheetId => "spreadsheet id",
            Self::AuditInfo => "audit info",
            Self::Viewport => "viewport",
        }
    }

    /// Type-check `value` and apply the constraints every value of this kind must satisfy.
    pub fn check(
        self,
        value: PropertyValue,
        property: &str,
    ) -> Result<PropertyValue, PropertyValueError> {
        if value.kind() != self {
            return Err(PropertyValueError::new(property, &value, self.expected()));
        }
        let cause = match &value {
            PropertyValue::Text(text) if text.trim().is_empty() => {
                Some("text is empty".to_string())
            }
            PropertyValue::Char(c) if c.is_control() => {
                Some("control characters are not allowed".to_string())
            }
            PropertyValue::AuditInfo(info) => info.validate().err().map(|err| err.to_string()),
            _ => None,
        };
        match cause {
            Some(cause) => {
                Err(PropertyValueError::new(property, &value, self.expected()).with_cause(cause))
            }
            None => Ok(value),
        }
    }

    /// Decode a JSON node into a value of this kind.
    pub fn unmarshall(
        self,
        node: &JsonValue,
        property: &str,
    ) -> Result<PropertyValue, PropertyValueError> {
        let invalid = || PropertyValueError::new(property, node, self.expected());
        let text = || node.as_str().ok_or_else(invalid);

        let value = match self {
            Self::Bool => PropertyValue::Bool(node.as_bool().ok_or_else(invalid)?),
            Self::Char => {
                let s = text()?;
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => PropertyValue::Char(c),
                    _ => return Err(invalid()),
                }
            }
            Self::U32 => {
                let n = node.as_u64().ok_or_else(invalid)?;
                PropertyValue::U32(u32::try_from(n).map_err(|err| invalid().with_cause(err))?)
            }
            Self::I64 => PropertyValue::I64(node.as_i64().ok_or_else(invalid)?),
            Self::Text => PropertyValue::Text(text()?.to_string()),
            Self::Color => PropertyValue::Color(
                Color::parse(text()?).map_err(|err| invalid().with_cause(err))?,
            ),
            Self::Locale => PropertyValue::Locale(
                LocaleTag::parse(text()?).map_err(|err| invalid().with_cause(err))?,
            ),
            Self::RoundingMode => PropertyValue::RoundingMode(
                RoundingMode::from_name(text()?).ok_or_else(invalid)?,
            ),
            Self::ExpressionNumberKind => PropertyValue::ExpressionNumberKind(
                ExpressionNumberKind::from_name(text()?).ok_or_else(invalid)?,
            ),
            Self::Selector => PropertyValue::Selector(
                Selector::parse(text()?).map_err(|err| invalid().with_cause(err))?,
            ),
            Self::PluginNames => PropertyValue::PluginNames(
                PluginNameSet::parse(text()?).map_err(|err| invalid().with_cause(err))?,
            ),
            Self::Aliases => PropertyValue::Aliases(
                AliasSet::parse(text()?).map_err(|err| invalid().with_cause(err))?,
            ),
            Self::SpreadsheetId => PropertyValue::SpreadsheetId(
                SpreadsheetId::parse(text()?).map_err(|err| invalid().with_cause(err))?,
            ),
            Self::AuditInfo => PropertyValue::AuditInfo(
                serde_json::from_value::<AuditInfo>(node.clone())
                    .map_err(|err| invalid().with_cause(err))?,
            ),
            Self::Viewport => {
                PropertyValue::Viewport(unmarshall_viewport(node).ok_or_else(invalid)?)
            }
        };
        self.check(value, property)
    }
}

fn unmarshall_viewport(node: &JsonValue) -> Option<Viewport> {
    let obj = node.as_object()?;
    if obj.keys().any(|k| k != "home" && k != "selection") {
        return None;
    }
    let home = CellReference::from_a1(obj.get("home")?.as_str()?).ok()?;
    let selection = match obj.get("selection") {
        None | Some(JsonValue::Null) => None,
        Some(value) => Some(CellRange::from_a1(value.as_str()?).ok()?),
    };
    Some(Viewport::new(home, selection))
}

/// A Rust type stored under a [`crate::PropertyKey`].
pub trait PropertyType: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    fn into_value(self) -> PropertyValue;

    fn from_value(value: &PropertyValue) -> Option<&Self>;
}

macro_rules! property_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl PropertyType for $ty {
                fn into_value(self) -> PropertyValue {
                    PropertyValue::$variant(self)
                }

                fn from_value(value: &PropertyValue) -> Option<&Self> {
                    match value {
                        PropertyValue::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

property_type! {
    bool => Bool,
    char => Char,
    u32 => U32,
    i64 => I64,
    String => Text,
    Color => Color,
    LocaleTag => Locale,
    RoundingMode => RoundingMode,
    ExpressionNumberKind => ExpressionNumberKind,
    Selector => Selector,
    PluginNameSet => PluginNames,
    AliasSet => Aliases,
    SpreadsheetId => SpreadsheetId,
    AuditInfo => AuditInfo,
    Viewport => Viewport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_rejects_wrong_kind() {
        let err = ValueKind::U32
            .check(PropertyValue::Text("7".to_string()), "precision")
            .unwrap_err();
        assert_eq!(err.property, "precision");
        assert_eq!(err.expected, "non-negative integer");
        assert_eq!(err.value, "7");
    }

    #[test]
    fn unmarshall_rejects_null_and_out_of_range() {
        assert!(ValueKind::Bool.unmarshall(&JsonValue::Null, "hide-zero-values").is_err());
        assert!(ValueKind::U32.unmarshall(&json!(-1), "precision").is_err());
        assert!(ValueKind::U32
            .unmarshall(&json!(u64::from(u32::MAX) + 1), "precision")
            .is_err());
        assert!(ValueKind::Char.unmarshall(&json!("ab"), "decimal-separator").is_err());
        assert!(ValueKind::Text.unmarshall(&json!("  "), "currency-symbol").is_err());
    }

    #[test]
    fn viewport_json_normalizes_home() {
        let value = ValueKind::Viewport
            .unmarshall(&json!({"home": "$B$2", "selection": "C3:D4"}), "viewport")
            .unwrap();
        assert_eq!(value.to_json(), json!({"home": "B2", "selection": "C3:D4"}));
        assert!(ValueKind::Viewport
            .unmarshall(&json!({"home": "B2", "zoom": 2}), "viewport")
            .is_err());
    }
}
