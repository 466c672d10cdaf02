use formula_metadata::properties::{EXPRESSION_NUMBER_KIND, LOCALE, PRECISION, ROUNDING_MODE};
use formula_metadata::{
    BuiltinLocaleData, DateTimeSymbols, DecimalNumberSymbols, ExpressionNumberKind,
    LocaleDataProvider, LocaleTag, MathContext, MetadataError, MissingComponents, RoundingMode,
    SpreadsheetMetadata,
};
use pretty_assertions::assert_eq;

fn missing(err: MetadataError) -> Vec<String> {
    match err {
        MetadataError::MissingProperties(names) => names,
        other => panic!("expected missing properties, got {other:?}"),
    }
}

#[test]
fn decimal_context_reports_every_missing_property() {
    let metadata = SpreadsheetMetadata::from_locale(&LocaleTag::parse("en-US").unwrap())
        .set(&EXPRESSION_NUMBER_KIND, ExpressionNumberKind::Double)
        .unwrap();
    let err = metadata.decimal_number_context().unwrap_err();
    assert_eq!(missing(err), ["precision", "rounding-mode"]);
}

#[test]
fn decimal_context_from_empty_lists_everything_sorted() {
    let names = missing(SpreadsheetMetadata::EMPTY.decimal_number_context().unwrap_err());
    assert_eq!(
        names,
        [
            "currency-symbol",
            "decimal-separator",
            "exponent-symbol",
            "expression-number-kind",
            "grouping-separator",
            "locale",
            "negative-sign",
            "percentage-symbol",
            "positive-sign",
            "precision",
            "rounding-mode",
        ]
    );
}

#[test]
fn decimal_context_resolves_through_defaults() {
    let metadata = SpreadsheetMetadata::from_locale(&LocaleTag::parse("de-CH").unwrap())
        .set_defaults(&SpreadsheetMetadata::non_locale_defaults())
        .unwrap();
    let ctx = metadata.decimal_number_context().unwrap();
    assert_eq!(ctx.locale.as_str(), "de-CH");
    assert_eq!(ctx.decimal_separator, '.');
    assert_eq!(
        ctx.math_context,
        MathContext {
            precision: 15,
            rounding_mode: RoundingMode::HalfUp
        }
    );
    assert_eq!(ctx.symbols().percentage_symbol, '%');
}

#[test]
fn math_context_needs_both_inputs() {
    let only_precision = SpreadsheetMetadata::EMPTY.set(&PRECISION, 5).unwrap();
    assert_eq!(
        missing(only_precision.math_context().unwrap_err()),
        ["rounding-mode"]
    );
    assert_eq!(
        missing(SpreadsheetMetadata::EMPTY.math_context().unwrap_err()),
        ["precision", "rounding-mode"]
    );

    let complete = only_precision
        .set(&ROUNDING_MODE, RoundingMode::Ceiling)
        .unwrap();
    assert_eq!(
        complete.math_context(),
        Ok(MathContext {
            precision: 5,
            rounding_mode: RoundingMode::Ceiling
        })
    );
}

/// Knows about locales but has no symbol data for any of them.
struct NoSymbols;

impl LocaleDataProvider for NoSymbols {
    fn available_locales(&self) -> Vec<LocaleTag> {
        Vec::new()
    }

    fn date_time_symbols_for(&self, _locale: &LocaleTag) -> Option<DateTimeSymbols> {
        None
    }

    fn decimal_symbols_for(&self, _locale: &LocaleTag) -> Option<DecimalNumberSymbols> {
        None
    }
}

#[test]
fn date_time_context_reports_missing_symbols_as_locale() {
    let metadata = SpreadsheetMetadata::EMPTY
        .set(&LOCALE, LocaleTag::parse("fr-FR").unwrap())
        .unwrap();
    let names = missing(metadata.date_time_context(&NoSymbols).unwrap_err());
    assert_eq!(
        names,
        ["date-time-offset", "default-year", "locale", "two-digit-year"]
    );

    let complete = metadata
        .set_defaults(&SpreadsheetMetadata::non_locale_defaults())
        .unwrap();
    assert_eq!(
        missing(complete.date_time_context(&NoSymbols).unwrap_err()),
        ["locale"]
    );
    let ctx = complete.date_time_context(&BuiltinLocaleData).unwrap();
    assert_eq!(ctx.month_name(8), Some("août"));
}

#[test]
fn custom_aggregation() {
    let metadata = SpreadsheetMetadata::EMPTY.set(&PRECISION, 2).unwrap();
    let mut components = MissingComponents::new(&metadata);
    assert_eq!(components.get_or_default(&PRECISION), Some(&2));
    assert_eq!(components.get_or_default(&LOCALE), None);
    assert!(!components.is_complete());
    let names: Vec<&str> = components.missing().map(|name| name.name()).collect();
    assert_eq!(names, ["locale"]);
}
