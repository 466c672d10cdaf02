use super::registry::{self, LocaleSymbols, LocaleTag};

/// Month, weekday, and meridiem names for date/time formatting and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeSymbols {
    pub month_names: Vec<String>,
    pub month_abbreviations: Vec<String>,
    pub weekday_names: Vec<String>,
    pub weekday_abbreviations: Vec<String>,
    pub am_pm: Vec<String>,
}

impl DateTimeSymbols {
    fn from_symbols(symbols: &LocaleSymbols) -> Self {
        let names = symbols.names;
        Self {
            month_names: owned(&names.month_names),
            month_abbreviations: owned(&names.month_abbreviations),
            weekday_names: owned(&names.weekday_names),
            weekday_abbreviations: owned(&names.weekday_abbreviations),
            am_pm: owned(&names.am_pm),
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Symbols used when formatting and parsing decimal numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalNumberSymbols {
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub exponent_symbol: String,
    pub grouping_separator: char,
    pub negative_sign: char,
    pub percentage_symbol: char,
    pub positive_sign: char,
}

impl DecimalNumberSymbols {
    fn from_symbols(symbols: &LocaleSymbols) -> Self {
        Self {
            currency_symbol: symbols.currency_symbol.to_string(),
            decimal_separator: symbols.decimal_separator,
            exponent_symbol: "E".to_string(),
            grouping_separator: symbols.grouping_separator,
            negative_sign: '-',
            percentage_symbol: '%',
            positive_sign: '+',
        }
    }
}

/// Source of per-locale symbol tables.
///
/// Metadata never owns locale data; callers supply a provider when building contexts that need
/// more than the properties themselves (e.g. month names).
pub trait LocaleDataProvider {
    fn available_locales(&self) -> Vec<LocaleTag>;

    fn date_time_symbols_for(&self, locale: &LocaleTag) -> Option<DateTimeSymbols>;

    fn decimal_symbols_for(&self, locale: &LocaleTag) -> Option<DecimalNumberSymbols>;
}

/// [`LocaleDataProvider`] backed by the built-in locale table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLocaleData;

impl LocaleDataProvider for BuiltinLocaleData {
    fn available_locales(&self) -> Vec<LocaleTag> {
        registry::ALL
            .iter()
            .filter_map(|symbols| LocaleTag::parse(symbols.id).ok())
            .collect()
    }

    fn date_time_symbols_for(&self, locale: &LocaleTag) -> Option<DateTimeSymbols> {
        registry::symbols_for(locale).map(DateTimeSymbols::from_symbols)
    }

    fn decimal_symbols_for(&self, locale: &LocaleTag) -> Option<DecimalNumberSymbols> {
        registry::symbols_for(locale).map(DecimalNumberSymbols::from_symbols)
    }
}
