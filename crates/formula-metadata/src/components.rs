//! Composite contexts assembled from several properties at once.

use std::collections::BTreeSet;

use crate::error::MetadataError;
use crate::locale::{DateTimeSymbols, DecimalNumberSymbols, LocaleDataProvider, LocaleTag};
use crate::metadata::SpreadsheetMetadata;
use crate::number::{ExpressionNumberKind, MathContext};
use crate::properties::{
    CURRENCY_SYMBOL, DATE_TIME_OFFSET, DECIMAL_SEPARATOR, DEFAULT_YEAR, EXPONENT_SYMBOL,
    EXPRESSION_NUMBER_KIND, GROUPING_SEPARATOR, LOCALE, NEGATIVE_SIGN, PERCENTAGE_SYMBOL,
    POSITIVE_SIGN, PRECISION, ROUNDING_MODE, TWO_DIGIT_YEAR,
};
use crate::property::{PropertyKey, PropertyName};
use crate::value::PropertyType;

/// Reads several properties (falling through to defaults) and remembers every one that is absent,
/// so a single error can name them all.
///
/// ```
/// use formula_metadata::{properties, MissingComponents, SpreadsheetMetadata};
///
/// let metadata = SpreadsheetMetadata::EMPTY;
/// let mut components = MissingComponents::new(&metadata);
/// let precision = components.get_or_default(&properties::PRECISION);
/// let rounding = components.get_or_default(&properties::ROUNDING_MODE);
/// assert!(precision.is_none() && rounding.is_none());
/// assert_eq!(
///     components.into_error().to_string(),
///     "missing properties: precision, rounding-mode"
/// );
/// ```
#[derive(Debug)]
pub struct MissingComponents<'a> {
    metadata: &'a SpreadsheetMetadata,
    missing: BTreeSet<PropertyName>,
}

impl<'a> MissingComponents<'a> {
    pub fn new(metadata: &'a SpreadsheetMetadata) -> Self {
        Self {
            metadata,
            missing: BTreeSet::new(),
        }
    }

    pub fn get_or_default<T: PropertyType>(&mut self, key: &PropertyKey<T>) -> Option<&'a T> {
        let value = self.metadata.get_or_default(key);
        if value.is_none() {
            self.report_missing(key.name());
        }
        value
    }

    /// Record `name` as missing even though it may be present, e.g. when its value cannot be used.
    pub fn report_missing(&mut self, name: &PropertyName) {
        self.missing.insert(name.clone());
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Missing names in property order.
    pub fn missing(&self) -> impl Iterator<Item = &PropertyName> {
        self.missing.iter()
    }

    pub fn into_error(self) -> MetadataError {
        MetadataError::MissingProperties(
            self.missing
                .into_iter()
                .map(|name| name.name().to_string())
                .collect(),
        )
    }
}

/// Symbols, locale, and math context for formatting and parsing decimal numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalNumberContext {
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub exponent_symbol: String,
    pub grouping_separator: char,
    pub negative_sign: char,
    pub percentage_symbol: char,
    pub positive_sign: char,
    pub locale: LocaleTag,
    pub math_context: MathContext,
    pub expression_number_kind: ExpressionNumberKind,
}

impl DecimalNumberContext {
    pub(crate) fn from_metadata(metadata: &SpreadsheetMetadata) -> Result<Self, MetadataError> {
        let mut components = MissingComponents::new(metadata);
        let currency_symbol = components.get_or_default(&CURRENCY_SYMBOL);
        let decimal_separator = components.get_or_default(&DECIMAL_SEPARATOR);
        let exponent_symbol = components.get_or_default(&EXPONENT_SYMBOL);
        let expression_number_kind = components.get_or_default(&EXPRESSION_NUMBER_KIND);
        let grouping_separator = components.get_or_default(&GROUPING_SEPARATOR);
        let locale = components.get_or_default(&LOCALE);
        let negative_sign = components.get_or_default(&NEGATIVE_SIGN);
        let percentage_symbol = components.get_or_default(&PERCENTAGE_SYMBOL);
        let positive_sign = components.get_or_default(&POSITIVE_SIGN);
        let precision = components.get_or_default(&PRECISION);
        let rounding_mode = components.get_or_default(&ROUNDING_MODE);

        match (
            currency_symbol,
            decimal_separator,
            exponent_symbol,
            expression_number_kind,
            grouping_separator,
            locale,
            negative_sign,
            percentage_symbol,
            positive_sign,
            precision,
            rounding_mode,
        ) {
            (
                Some(currency_symbol),
                Some(&decimal_separator),
                Some(exponent_symbol),
                Some(&expression_number_kind),
                Some(&grouping_separator),
                Some(locale),
                Some(&negative_sign),
                Some(&percentage_symbol),
                Some(&positive_sign),
                Some(&precision),
                Some(&rounding_mode),
            ) => Ok(Self {
                currency_symbol: currency_symbol.clone(),
                decimal_separator,
                exponent_symbol: exponent_symbol.clone(),
                grouping_separator,
                negative_sign,
                percentage_symbol,
                positive_sign,
                locale: locale.clone(),
                math_context: MathContext {
                    precision,
                    rounding_mode,
                },
                expression_number_kind,
            }),
            _ => Err(components.into_error()),
        }
    }

    pub fn symbols(&self) -> DecimalNumberSymbols {
        DecimalNumberSymbols {
            currency_symbol: self.currency_symbol.clone(),
            decimal_separator: self.decimal_separator,
            exponent_symbol: self.exponent_symbol.clone(),
            grouping_separator: self.grouping_separator,
            negative_sign: self.negative_sign,
            percentage_symbol: self.percentage_symbol,
            positive_sign: self.positive_sign,
        }
    }

    /// Round `value` to the context's precision and write it without grouping, using the
    /// context's decimal separator and negative sign. `None` when rounding is required but the
    /// rounding mode forbids it.
    pub fn format_plain(&self, value: f64) -> Option<String> {
        let rounded = self.math_context.round(value)?;
        let digits = rounded.abs().to_string().replace('.', &self.decimal_separator.to_string());
        if rounded < 0.0 {
            Some(format!("{}{digits}", self.negative_sign))
        } else {
            Some(digits)
        }
    }
}

/// Locale-dependent settings for formatting and parsing dates and times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeContext {
    pub locale: LocaleTag,
    pub default_year: u32,
    pub two_digit_year: u32,
    pub date_time_offset: i64,
    pub symbols: DateTimeSymbols,
}

impl DateTimeContext {
    /// Symbols the provider cannot supply are reported as a missing `locale`.
    pub(crate) fn from_metadata(
        metadata: &SpreadsheetMetadata,
        provider: &dyn LocaleDataProvider,
    ) -> Result<Self, MetadataError> {
        let mut components = MissingComponents::new(metadata);
        let date_time_offset = components.get_or_default(&DATE_TIME_OFFSET);
        let default_year = components.get_or_default(&DEFAULT_YEAR);
        let locale = components.get_or_default(&LOCALE);
        let two_digit_year = components.get_or_default(&TWO_DIGIT_YEAR);

        let symbols = locale.and_then(|locale| provider.date_time_symbols_for(locale));
        if locale.is_some() && symbols.is_none() {
            components.report_missing(LOCALE.name());
        }

        match (date_time_offset, default_year, locale, two_digit_year, symbols) {
            (
                Some(&date_time_offset),
                Some(&default_year),
                Some(locale),
                Some(&two_digit_year),
                Some(symbols),
            ) => Ok(Self {
                locale: locale.clone(),
                default_year,
                two_digit_year,
                date_time_offset,
                symbols,
            }),
            _ => Err(components.into_error()),
        }
    }

    /// Expand a two-digit year: values at or below `two_digit_year` land in the 2000s, the rest in
    /// the 1900s. Longer years pass through.
    pub fn full_year(&self, year: u32) -> u32 {
        match year {
            0..=99 if year <= self.two_digit_year => 2000 + year,
            0..=99 => 1900 + year,
            _ => year,
        }
    }

    /// Full month name for `month` in `1..=12`.
    pub fn month_name(&self, month: u32) -> Option<&str> {
        let idx = usize::try_from(month.checked_sub(1)?).ok()?;
        self.symbols.month_names.get(idx).map(String::as_str)
    }
}
