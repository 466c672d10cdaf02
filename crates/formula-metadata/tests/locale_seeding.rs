use formula_metadata::properties::{
    CURRENCY_SYMBOL, DATE_FORMATTER, DATE_TIME_PARSER, DECIMAL_SEPARATOR, GROUPING_SEPARATOR,
    LOCALE, PRECISION, SPREADSHEET_ID, TIME_FORMATTER, VALUE_SEPARATOR,
};
use formula_metadata::{BuiltinLocaleData, LocaleDataProvider, LocaleTag, SpreadsheetMetadata};
use pretty_assertions::assert_eq;

fn tag(text: &str) -> LocaleTag {
    LocaleTag::parse(text).unwrap()
}

#[test]
fn extraction_per_key() {
    let de = tag("de-DE");
    assert_eq!(CURRENCY_SYMBOL.extract_from_locale(&de), Some("€".to_string()));
    assert_eq!(DECIMAL_SEPARATOR.extract_from_locale(&de), Some(','));
    assert_eq!(GROUPING_SEPARATOR.extract_from_locale(&de), Some('.'));
    assert_eq!(VALUE_SEPARATOR.extract_from_locale(&de), Some(';'));
    assert_eq!(
        DATE_FORMATTER
            .extract_from_locale(&de)
            .map(|selector| selector.to_string()),
        Some("date-format-pattern dd.mm.yyyy".to_string())
    );

    // Locale-independent keys extract nothing.
    assert_eq!(PRECISION.extract_from_locale(&de), None);
    assert_eq!(SPREADSHEET_ID.extract_from_locale(&de), None);
}

#[test]
fn region_variants_fall_back_to_the_language() {
    let fr_ca = tag("fr_CA");
    assert_eq!(fr_ca.as_str(), "fr-CA");
    assert_eq!(DECIMAL_SEPARATOR.extract_from_locale(&fr_ca), Some(','));
    assert_eq!(
        TIME_FORMATTER
            .extract_from_locale(&fr_ca)
            .map(|selector| selector.text().to_string()),
        Some("hh:mm:ss".to_string())
    );
}

#[test]
fn from_locale_seeds_every_locale_property() {
    let metadata = SpreadsheetMetadata::from_locale(&tag("en-US"));
    assert_eq!(metadata.get(&LOCALE), Some(&tag("en-US")));
    assert_eq!(metadata.get(&CURRENCY_SYMBOL).map(String::as_str), Some("$"));
    assert_eq!(
        metadata.get(&DATE_TIME_PARSER).map(|s| s.to_string()),
        Some("date-time-parse-pattern m/d/yyyy h:mm:ss AM/PM".to_string())
    );
    assert!(metadata.entries().all(|(name, _)| name.is_shareable()));

    let names: Vec<&str> = metadata.entries().map(|(name, _)| name.name()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[test]
fn unknown_locales_only_seed_the_locale() {
    let metadata = SpreadsheetMetadata::from_locale(&tag("ja-JP"));
    let names: Vec<&str> = metadata.entries().map(|(name, _)| name.name()).collect();
    assert_eq!(names, ["locale"]);
}

#[test]
fn builtin_provider_lists_its_locales() {
    let locales = BuiltinLocaleData.available_locales();
    assert_eq!(locales.len(), 10);
    assert!(locales.contains(&tag("it-CH")));
    let symbols = BuiltinLocaleData.decimal_symbols_for(&tag("de-CH")).unwrap();
    assert_eq!(symbols.grouping_separator, '\'');
    assert!(BuiltinLocaleData.date_time_symbols_for(&tag("ja-JP")).is_none());
}
