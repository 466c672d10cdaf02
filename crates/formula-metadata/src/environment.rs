use crate::metadata::SpreadsheetMetadata;
use crate::property::PropertyName;
use crate::value::PropertyValue;

/// A source of named values for the engine's general-purpose context layer.
pub trait EnvironmentContext {
    fn get(&self, name: &str) -> Option<PropertyValue>;
}

/// Names that are not properties resolve to nothing; known properties fall through to defaults.
impl EnvironmentContext for SpreadsheetMetadata {
    fn get(&self, name: &str) -> Option<PropertyValue> {
        let name = PropertyName::named(name).ok()?;
        self.get_value_or_default(&name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::PRECISION;

    #[test]
    fn resolves_known_names_through_defaults() {
        let defaults = SpreadsheetMetadata::EMPTY.set(&PRECISION, 12).unwrap();
        let metadata = SpreadsheetMetadata::EMPTY.set_defaults(&defaults).unwrap();
        let env: &dyn EnvironmentContext = &metadata;
        assert_eq!(env.get("precision"), Some(PropertyValue::U32(12)));
        assert_eq!(env.get("color-1"), None);
        assert_eq!(env.get("no-such-thing"), None);
    }
}
