use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

use serde_json::Value as JsonValue;

use crate::color::ColorName;
use crate::error::{MetadataError, PropertyValueError};
use crate::locale::LocaleTag;
use crate::properties::{NAMED_COLOR, NUMBERED_COLOR, REGISTRY};
use crate::value::{PropertyType, PropertyValue, ValueKind};

/// Prefix shared by the generated `color-<number>` and `color-<Name>` properties.
pub const COLOR_PREFIX: &str = "color-";

/// Palette slots are numbered from here; `color-<Name>` values use the same numbering.
pub const FIRST_COLOR_NUMBER: u32 = 1;

/// Generated numbered-color names below this bound are built once and reused.
pub const NUMBERED_COLOR_CACHE_SIZE: u32 = 32;

/// Property-specific validation run after the kind check. `Ok(Some(..))` replaces the value with a
/// normalized form.
pub type Constraint = fn(&PropertyValue) -> Result<Option<PropertyValue>, String>;

/// Computes a sensible value for a property from a locale alone.
pub type LocaleExtractor = fn(&LocaleTag) -> Option<PropertyValue>;

/// Whether a property may be shared through a defaults metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Legal in a defaults metadata (locale, rounding mode, colors, ...).
    Shared,
    /// Describes one spreadsheet only (id, name, audit info, viewport, ...).
    Document,
}

/// Static descriptor of one property: its wire name, value kind, and per-property behavior.
pub struct Property {
    pub(crate) name: &'static str,
    pub(crate) kind: ValueKind,
    pub(crate) scope: Scope,
    pub(crate) pinned: bool,
    pub(crate) sorts_first: bool,
    pub(crate) constraint: Option<Constraint>,
    pub(crate) from_locale: Option<LocaleExtractor>,
}

impl Property {
    pub(crate) const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            scope: Scope::Shared,
            pinned: false,
            sorts_first: false,
            constraint: None,
            from_locale: None,
        }
    }

    pub(crate) const fn document(self) -> Self {
        Self {
            scope: Scope::Document,
            ..self
        }
    }

    pub(crate) const fn pinned(self) -> Self {
        Self {
            pinned: true,
            ..self
        }
    }

    pub(crate) const fn sorts_first(self) -> Self {
        Self {
            sorts_first: true,
            ..self
        }
    }

    pub(crate) const fn constraint(self, constraint: Constraint) -> Self {
        Self {
            constraint: Some(constraint),
            ..self
        }
    }

    pub(crate) const fn from_locale(self, extractor: LocaleExtractor) -> Self {
        Self {
            from_locale: Some(extractor),
            ..self
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("scope", &self.scope)
            .field("pinned", &self.pinned)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
enum Generated {
    NumberedColor { number: u32, name: Arc<str> },
    NamedColor { color: ColorName, name: Arc<str> },
}

/// Untyped identity of a property.
///
/// Equality, hashing, and ordering use the (case-sensitive) name only. Ordering is by name except
/// that `spreadsheet-id` always sorts first.
#[derive(Clone)]
pub struct PropertyName {
    property: &'static Property,
    generated: Option<Generated>,
}

impl PropertyName {
    pub(crate) const fn fixed(property: &'static Property) -> Self {
        Self {
            property,
            generated: None,
        }
    }

    /// Look up a property by its wire name.
    pub fn named(name: &str) -> Result<Self, MetadataError> {
        if let Some(property) = REGISTRY.iter().find(|p| p.name == name) {
            return Ok(Self::fixed(property));
        }

        let unknown = || MetadataError::UnknownProperty(name.to_string());
        let suffix = name.strip_prefix(COLOR_PREFIX).ok_or_else(unknown)?;
        if suffix.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            // Canonical spelling only, so the name round-trips (`color-01` is not `color-1`).
            if suffix.len() > 1 && suffix.starts_with('0') {
                return Err(unknown());
            }
            let number = suffix.parse::<u32>().map_err(|_| unknown())?;
            if number < FIRST_COLOR_NUMBER {
                return Err(unknown());
            }
            Ok(Self::numbered_color(number))
        } else {
            let color = ColorName::new(suffix).map_err(|_| unknown())?;
            Ok(Self::named_color(&color))
        }
    }

    /// Every fixed (non-generated) property, in sort order.
    pub fn all() -> Vec<PropertyName> {
        let mut names: Vec<PropertyName> = REGISTRY.iter().map(|p| Self::fixed(p)).collect();
        names.sort();
        names
    }

    /// The `color-<number>` property holding the color for palette slot `number`.
    ///
    /// Slot `0` has a name but rejects every value.
    pub fn numbered_color(number: u32) -> Self {
        static CACHE: OnceLock<Vec<PropertyName>> = OnceLock::new();
        if number < NUMBERED_COLOR_CACHE_SIZE {
            let cache = CACHE.get_or_init(|| {
                (0..NUMBERED_COLOR_CACHE_SIZE)
                    .map(Self::generate_numbered_color)
                    .collect()
            });
            return cache[number as usize].clone();
        }
        Self::generate_numbered_color(number)
    }

    fn generate_numbered_color(number: u32) -> Self {
        Self {
            property: &NUMBERED_COLOR,
            generated: Some(Generated::NumberedColor {
                number,
                name: Arc::from(format!("{COLOR_PREFIX}{number}")),
            }),
        }
    }

    /// The `color-<Name>` property holding the palette number for a named color.
    pub fn named_color(color: &ColorName) -> Self {
        Self {
            property: &NAMED_COLOR,
            generated: Some(Generated::NamedColor {
                color: color.clone(),
                name: Arc::from(format!("{COLOR_PREFIX}{color}")),
            }),
        }
    }

    pub fn name(&self) -> &str {
        match &self.generated {
            None => self.property.name,
            Some(Generated::NumberedColor { name, .. })
            | Some(Generated::NamedColor { name, .. }) => name,
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.property.kind
    }

    pub fn scope(&self) -> Scope {
        self.property.scope
    }

    /// `true` when the property may appear in a defaults metadata.
    pub fn is_shareable(&self) -> bool {
        self.property.scope == Scope::Shared
    }

    /// Pinned properties always get a local entry on `set`, even when the defaults already hold
    /// the same value.
    pub fn is_pinned(&self) -> bool {
        self.property.pinned
    }

    pub fn color_number(&self) -> Option<u32> {
        match &self.generated {
            Some(Generated::NumberedColor { number, .. }) => Some(*number),
            _ => None,
        }
    }

    pub fn color_name(&self) -> Option<&ColorName> {
        match &self.generated {
            Some(Generated::NamedColor { color, .. }) => Some(color),
            _ => None,
        }
    }

    /// Sort key: a rank (properties that sort first get `0`) and the name.
    pub fn sort_key(&self) -> (u8, &str) {
        (u8::from(!self.property.sorts_first), self.name())
    }

    /// Validate `value` for this property, returning the (possibly normalized) value to store.
    pub fn check_value(&self, value: PropertyValue) -> Result<PropertyValue, PropertyValueError> {
        if self.color_number().is_some_and(|number| number < FIRST_COLOR_NUMBER) {
            return Err(
                PropertyValueError::new(self.name(), &value, self.kind().expected())
                    .with_cause(format!("color numbers start at {FIRST_COLOR_NUMBER}")),
            );
        }
        let checked = self.kind().check(value, self.name())?;
        let Some(constraint) = self.property.constraint else {
            return Ok(checked);
        };
        match constraint(&checked) {
            Ok(None) => Ok(checked),
            Ok(Some(normalized)) => Ok(normalized),
            Err(cause) => Err(
                PropertyValueError::new(self.name(), &checked, self.kind().expected())
                    .with_cause(cause),
            ),
        }
    }

    /// A default for this property derived purely from `locale`, if the property depends on one.
    pub fn extract_from_locale(&self, locale: &LocaleTag) -> Option<PropertyValue> {
        let extractor = self.property.from_locale?;
        // Extracted values go through the same checks as anything else that gets stored.
        extractor(locale).and_then(|value| self.check_value(value).ok())
    }

    pub fn unmarshall(&self, node: &JsonValue) -> Result<PropertyValue, PropertyValueError> {
        let value = self.kind().unmarshall(node, self.name())?;
        self.check_value(value)
    }
}

impl PartialEq for PropertyName {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for PropertyName {}

impl Hash for PropertyName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl PartialOrd for PropertyName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PropertyName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Debug for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyName({:?})", self.name())
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A strongly-typed handle to a property whose values are `T`.
pub struct PropertyKey<T> {
    name: PropertyName,
    _type: PhantomData<fn() -> T>,
}

impl<T> PropertyKey<T> {
    pub(crate) const fn fixed(property: &'static Property) -> Self {
        Self {
            name: PropertyName::fixed(property),
            _type: PhantomData,
        }
    }

    pub fn name(&self) -> &PropertyName {
        &self.name
    }
}

impl<T: PropertyType> PropertyKey<T> {
    /// Validate `value` for this property, returning the (possibly normalized) value.
    pub fn check_value(&self, value: T) -> Result<T, PropertyValueError> {
        let checked = self.name.check_value(value.into_value())?;
        T::from_value(&checked)
            .cloned()
            .ok_or_else(|| {
                PropertyValueError::new(self.name.name(), &checked, self.name.kind().expected())
            })
    }

    pub fn extract_from_locale(&self, locale: &LocaleTag) -> Option<T> {
        let value = self.name.extract_from_locale(locale)?;
        T::from_value(&value).cloned()
    }
}

impl PropertyKey<crate::color::Color> {
    /// Typed `color-<number>` key.
    pub fn numbered_color(number: u32) -> Self {
        Self {
            name: PropertyName::numbered_color(number),
            _type: PhantomData,
        }
    }
}

impl PropertyKey<u32> {
    /// Typed `color-<Name>` key; the value is a palette number.
    pub fn named_color(color: &ColorName) -> Self {
        Self {
            name: PropertyName::named_color(color),
            _type: PhantomData,
        }
    }
}

impl<T> Clone for PropertyKey<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _type: PhantomData,
        }
    }
}

impl<T> fmt::Debug for PropertyKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyKey({:?})", self.name.name())
    }
}

impl<T> PartialEq for PropertyKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for PropertyKey<T> {}
