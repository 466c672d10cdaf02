use core::fmt;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::color::{ColorName, DEFAULT_PALETTE};
use crate::components::{DateTimeContext, DecimalNumberContext, MissingComponents};
use crate::error::{MetadataError, Result};
use crate::locale::{symbols_for, LocaleDataProvider, LocaleTag};
use crate::number::{ExpressionNumberKind, MathContext, RoundingMode};
use crate::plugins::PluginName;
use crate::properties::{
    CELL_CHARACTER_WIDTH, DATE_TIME_OFFSET, DEFAULT_YEAR, EXPRESSION_NUMBER_KIND,
    GENERAL_NUMBER_FORMAT_DIGITS, HIDE_ZERO_VALUES, NUMBER_FORMATTER, NUMBER_PARSER, PRECISION,
    ROUNDING_MODE, TEXT_FORMATTER, TWO_DIGIT_YEAR,
};
use crate::property::{PropertyKey, PropertyName};
use crate::selector::{Selector, NUMBER_FORMAT_PATTERN, NUMBER_PARSE_PATTERN, TEXT_FORMAT_PATTERN};
use crate::value::{PropertyType, PropertyValue};
use crate::visitor::{ColorTable, MetadataVisitor, PluginTable};

/// The metadata of one spreadsheet: an immutable, sorted set of validated property values with an
/// optional one-level defaults fallback.
///
/// Every update returns a new instance; clones are cheap and share entries. Derived views (color
/// and plugin tables, math and decimal-number contexts) are computed on first use and cached on
/// the instance.
#[derive(Clone, Default)]
pub struct SpreadsheetMetadata {
    inner: Option<Arc<NonEmpty>>,
}

struct NonEmpty {
    /// Sorted by [`PropertyName`], one entry per name.
    entries: Vec<(PropertyName, PropertyValue)>,
    defaults: Option<SpreadsheetMetadata>,
    color_table: OnceLock<Arc<ColorTable>>,
    plugin_table: OnceLock<Arc<PluginTable>>,
    math_context: OnceLock<Result<MathContext>>,
    decimal_number_context: OnceLock<Result<DecimalNumberContext>>,
}

/// Memoized views may be computed twice when two callers race; both results are equal, and
/// whichever lands first is kept.
fn memoize<T>(cell: &OnceLock<T>, compute: impl FnOnce() -> T) -> &T {
    if let Some(value) = cell.get() {
        return value;
    }
    let _ = cell.set(compute());
    cell.get().expect("memo cell is populated")
}

impl SpreadsheetMetadata {
    /// Metadata with no entries and no defaults.
    pub const EMPTY: SpreadsheetMetadata = SpreadsheetMetadata { inner: None };

    fn from_parts(
        entries: Vec<(PropertyName, PropertyValue)>,
        defaults: Option<SpreadsheetMetadata>,
    ) -> Self {
        if entries.is_empty() && defaults.is_none() {
            return Self::EMPTY;
        }
        Self {
            inner: Some(Arc::new(NonEmpty {
                entries,
                defaults,
                color_table: OnceLock::new(),
                plugin_table: OnceLock::new(),
                math_context: OnceLock::new(),
                decimal_number_context: OnceLock::new(),
            })),
        }
    }

    /// Build metadata from arbitrary entries, validating each value. Later duplicates win.
    pub fn with(
        entries: impl IntoIterator<Item = (PropertyName, PropertyValue)>,
    ) -> Result<Self> {
        let mut sorted = BTreeMap::new();
        for (name, value) in entries {
            let value = name.check_value(value)?;
            sorted.insert(name, value);
        }
        Ok(Self::from_parts(sorted.into_iter().collect(), None))
    }

    /// `true` only for [`SpreadsheetMetadata::EMPTY`]; metadata holding just defaults is not empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Number of local entries.
    pub fn len(&self) -> usize {
        self.entry_slice().len()
    }

    fn entry_slice(&self) -> &[(PropertyName, PropertyValue)] {
        self.inner.as_deref().map_or(&[], |inner| inner.entries.as_slice())
    }

    /// Local entries in sort order.
    pub fn entries(&self) -> impl Iterator<Item = (&PropertyName, &PropertyValue)> {
        self.entry_slice().iter().map(|(name, value)| (name, value))
    }

    pub fn defaults(&self) -> Option<&SpreadsheetMetadata> {
        self.inner.as_deref().and_then(|inner| inner.defaults.as_ref())
    }

    fn position(&self, name: &PropertyName) -> std::result::Result<usize, usize> {
        self.entry_slice().binary_search_by(|(n, _)| n.cmp(name))
    }

    /// Local value only.
    pub fn get_value(&self, name: &PropertyName) -> Option<&PropertyValue> {
        let idx = self.position(name).ok()?;
        Some(&self.entry_slice()[idx].1)
    }

    /// Local value, else the defaults' value.
    pub fn get_value_or_default(&self, name: &PropertyName) -> Option<&PropertyValue> {
        self.get_value(name)
            .or_else(|| self.defaults().and_then(|defaults| defaults.get_value(name)))
    }

    pub fn get<T: PropertyType>(&self, key: &PropertyKey<T>) -> Option<&T> {
        self.get_value(key.name()).and_then(T::from_value)
    }

    pub fn get_or_default<T: PropertyType>(&self, key: &PropertyKey<T>) -> Option<&T> {
        self.get_value_or_default(key.name()).and_then(T::from_value)
    }

    /// Like [`SpreadsheetMetadata::get_or_default`], failing when neither this metadata nor its
    /// defaults hold the property.
    pub fn get_or_fail<T: PropertyType>(&self, key: &PropertyKey<T>) -> Result<&T> {
        self.get_or_default(key)
            .ok_or_else(|| MetadataError::MissingProperty(key.name().name().to_string()))
    }

    pub fn set<T: PropertyType>(&self, key: &PropertyKey<T>, value: T) -> Result<Self> {
        self.set_value(key.name(), value.into_value())
    }

    /// Validate and store `value`, returning the updated metadata.
    ///
    /// Returns `self` unchanged when the value is already stored locally, or when it already
    /// resolves through the defaults and the property is not pinned.
    pub fn set_value(&self, name: &PropertyName, value: PropertyValue) -> Result<Self> {
        let value = name.check_value(value)?;

        let local = self.get_value(name);
        if local == Some(&value) {
            return Ok(self.clone());
        }
        if local.is_none()
            && !name.is_pinned()
            && self.defaults().and_then(|d| d.get_value(name)) == Some(&value)
        {
            return Ok(self.clone());
        }

        let mut entries = self.entry_slice().to_vec();
        match self.position(name) {
            Ok(idx) => entries[idx].1 = value,
            Err(idx) => entries.insert(idx, (name.clone(), value)),
        }
        Ok(Self::from_parts(entries, self.defaults().cloned()))
    }

    pub fn remove<T>(&self, key: &PropertyKey<T>) -> Self {
        self.remove_value(key.name())
    }

    /// Drop the local entry for `name`. Defaults are never touched.
    pub fn remove_value(&self, name: &PropertyName) -> Self {
        let Ok(idx) = self.position(name) else {
            return self.clone();
        };
        let mut entries = self.entry_slice().to_vec();
        entries.remove(idx);
        Self::from_parts(entries, self.defaults().cloned())
    }

    /// Replace the defaults. Passing [`SpreadsheetMetadata::EMPTY`] clears them.
    pub fn set_defaults(&self, defaults: &SpreadsheetMetadata) -> Result<Self> {
        if defaults.is_empty() {
            return Ok(Self::from_parts(self.entry_slice().to_vec(), None));
        }
        if defaults.defaults().is_some() {
            return Err(MetadataError::DefaultsHaveDefaults);
        }
        if let Some((name, _)) = defaults.entries().find(|(name, _)| !name.is_shareable()) {
            return Err(MetadataError::NonShareableDefault(name.name().to_string()));
        }
        if self.defaults() == Some(defaults) {
            return Ok(self.clone());
        }
        Ok(Self::from_parts(
            self.entry_slice().to_vec(),
            Some(defaults.clone()),
        ))
    }

    /// Run `visitor` over the local entries in sort order.
    pub fn accept(&self, visitor: &mut impl MetadataVisitor) {
        for (name, value) in self.entries() {
            name.accept(value, visitor);
        }
    }

    /// Run `visitor` over the defaults first and then the local entries, so local values are seen
    /// last and win in any map the visitor builds.
    pub fn accept_with_defaults(&self, visitor: &mut impl MetadataVisitor) {
        if let Some(defaults) = self.defaults() {
            defaults.accept(visitor);
        }
        self.accept(visitor);
    }

    pub fn color_table(&self) -> Arc<ColorTable> {
        match self.inner.as_deref() {
            Some(inner) => {
                Arc::clone(memoize(&inner.color_table, || Arc::new(ColorTable::build(self))))
            }
            None => Arc::new(ColorTable::default()),
        }
    }

    pub fn plugin_table(&self) -> Arc<PluginTable> {
        match self.inner.as_deref() {
            Some(inner) => {
                Arc::clone(memoize(&inner.plugin_table, || Arc::new(PluginTable::build(self))))
            }
            None => Arc::new(PluginTable::default()),
        }
    }

    /// Precision and rounding mode, reporting both when both are missing.
    pub fn math_context(&self) -> Result<MathContext> {
        match self.inner.as_deref() {
            Some(inner) => memoize(&inner.math_context, || self.build_math_context()).clone(),
            None => self.build_math_context(),
        }
    }

    fn build_math_context(&self) -> Result<MathContext> {
        let mut components = MissingComponents::new(self);
        let precision = components.get_or_default(&PRECISION);
        let rounding_mode = components.get_or_default(&ROUNDING_MODE);
        match (precision, rounding_mode) {
            (Some(&precision), Some(&rounding_mode)) => Ok(MathContext {
                precision,
                rounding_mode,
            }),
            _ => Err(components.into_error()),
        }
    }

    /// Everything needed to format and parse decimal numbers.
    pub fn decimal_number_context(&self) -> Result<DecimalNumberContext> {
        match self.inner.as_deref() {
            Some(inner) => memoize(&inner.decimal_number_context, || {
                DecimalNumberContext::from_metadata(self)
            })
            .clone(),
            None => DecimalNumberContext::from_metadata(self),
        }
    }

    /// Locale-dependent date/time settings; month and weekday names come from `provider`.
    pub fn date_time_context(&self, provider: &dyn LocaleDataProvider) -> Result<DateTimeContext> {
        DateTimeContext::from_metadata(self, provider)
    }

    /// Metadata holding every value derivable from `locale` alone.
    pub fn from_locale(locale: &LocaleTag) -> Self {
        if symbols_for(locale).is_none() {
            log::warn!("no built-in symbols for locale {locale}; only the locale itself is seeded");
        }
        let entries: Vec<_> = PropertyName::all()
            .into_iter()
            .filter_map(|name| {
                let value = name.extract_from_locale(locale)?;
                Some((name, value))
            })
            .collect();
        log::debug!("seeded {} properties from locale {locale}", entries.len());
        Self::from_parts(entries, None)
    }

    /// Locale-independent defaults: the standard palette, rounding, precision, number kind, and
    /// date handling.
    pub fn non_locale_defaults() -> Self {
        static DEFAULTS: OnceLock<SpreadsheetMetadata> = OnceLock::new();
        DEFAULTS
            .get_or_init(|| {
                let mut entries = vec![
                    (CELL_CHARACTER_WIDTH.name().clone(), PropertyValue::U32(10)),
                    (DATE_TIME_OFFSET.name().clone(), PropertyValue::I64(25_569)),
                    (DEFAULT_YEAR.name().clone(), PropertyValue::U32(1900)),
                    (
                        EXPRESSION_NUMBER_KIND.name().clone(),
                        PropertyValue::ExpressionNumberKind(ExpressionNumberKind::Double),
                    ),
                    (GENERAL_NUMBER_FORMAT_DIGITS.name().clone(), PropertyValue::U32(8)),
                    (HIDE_ZERO_VALUES.name().clone(), PropertyValue::Bool(false)),
                    (
                        NUMBER_FORMATTER.name().clone(),
                        builtin_selector(NUMBER_FORMAT_PATTERN, "General"),
                    ),
                    (
                        NUMBER_PARSER.name().clone(),
                        builtin_selector(NUMBER_PARSE_PATTERN, "General"),
                    ),
                    (PRECISION.name().clone(), PropertyValue::U32(15)),
                    (
                        ROUNDING_MODE.name().clone(),
                        PropertyValue::RoundingMode(RoundingMode::HalfUp),
                    ),
                    (TEXT_FORMATTER.name().clone(), builtin_selector(TEXT_FORMAT_PATTERN, "@")),
                    (TWO_DIGIT_YEAR.name().clone(), PropertyValue::U32(29)),
                ];
                for (number, name, color) in DEFAULT_PALETTE {
                    let color_name = ColorName::new(name).expect("palette names are valid");
                    entries.push((
                        PropertyName::numbered_color(number),
                        PropertyValue::Color(color),
                    ));
                    entries.push((
                        PropertyName::named_color(&color_name),
                        PropertyValue::U32(number),
                    ));
                }
                SpreadsheetMetadata::with(entries).expect("built-in defaults are valid")
            })
            .clone()
    }
}

fn builtin_selector(plugin: &str, text: &str) -> PropertyValue {
    let name = PluginName::new(plugin).expect("built-in plugin names are valid");
    PropertyValue::Selector(Selector::new(name, text).expect("built-in patterns are valid"))
}

impl PartialEq for SpreadsheetMetadata {
    fn eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (Some(a), Some(b)) if Arc::ptr_eq(a, b) => true,
            _ => self.entry_slice() == other.entry_slice() && self.defaults() == other.defaults(),
        }
    }
}

impl Eq for SpreadsheetMetadata {}

impl fmt::Debug for SpreadsheetMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in self.entries() {
            map.entry(&name.name(), value);
        }
        if let Some(defaults) = self.defaults() {
            map.entry(&"_defaults", defaults);
        }
        map.finish()
    }
}

impl fmt::Display for SpreadsheetMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
