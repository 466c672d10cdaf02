//! The closed set of spreadsheet metadata properties.
//!
//! Every property is declared once below as a [`Property`] descriptor plus a typed
//! [`PropertyKey`]. `PropertyName::named` resolves wire names against the same table.

use crate::address::{EXCEL_MAX_COLS, EXCEL_MAX_ROWS};
use crate::document::{AuditInfo, SpreadsheetId, Viewport};
use crate::locale::{symbols_for, LocaleSymbols, LocaleTag};
use crate::number::{ExpressionNumberKind, RoundingMode};
use crate::plugins::{AliasSet, PluginName, PluginNameSet};
use crate::property::{Property, PropertyKey, FIRST_COLOR_NUMBER};
use crate::selector::{
    Selector, DATE_FORMAT_PATTERN, DATE_PARSE_PATTERN, DATE_TIME_FORMAT_PATTERN,
    DATE_TIME_PARSE_PATTERN, NUMBER_FORMAT_PATTERN, NUMBER_PARSE_PATTERN, TEXT_FORMAT_PATTERN,
    TIME_FORMAT_PATTERN, TIME_PARSE_PATTERN,
};
use crate::value::{PropertyValue, ValueKind};

/// Largest value accepted by `two-digit-year`.
pub const TWO_DIGIT_YEAR_MAX: u32 = 99;

/// Largest value accepted by `default-year`.
pub const DEFAULT_YEAR_MAX: u32 = 9999;

/// Largest value accepted by `precision`.
pub const PRECISION_MAX: u32 = 128;

/// Longest accepted `spreadsheet-name`, in characters.
pub const SPREADSHEET_NAME_MAX_LEN: usize = 255;

macro_rules! properties {
    ($( $(#[$meta:meta])* $key:ident: $ty:ty = $property:expr; )*) => {
        mod descriptors {
            use super::*;

            $( pub(super) static $key: Property = $property; )*
        }

        $(
            $(#[$meta])*
            pub static $key: PropertyKey<$ty> = PropertyKey::fixed(&descriptors::$key);
        )*

        pub(crate) static REGISTRY: &[&Property] = &[ $( &descriptors::$key ),* ];
    };
}

properties! {
    /// Who created and last modified the spreadsheet.
    AUDIT_INFO: AuditInfo = Property::new("audit-info", ValueKind::AuditInfo).document();
    AUTO_HIDE_SCROLLBARS: bool = Property::new("auto-hide-scrollbars", ValueKind::Bool);
    /// Width of one character in pixels, used to convert column widths.
    CELL_CHARACTER_WIDTH: u32 =
        Property::new("cell-character-width", ValueKind::U32).constraint(at_least_one);
    COMPARATORS: AliasSet = Property::new("comparators", ValueKind::Aliases);
    CONVERTERS: AliasSet = Property::new("converters", ValueKind::Aliases);
    CURRENCY_SYMBOL: String = Property::new("currency-symbol", ValueKind::Text)
        .from_locale(|locale| {
            with_symbols(locale, |s| PropertyValue::Text(s.currency_symbol.to_string()))
        });
    DATE_FORMATTER: Selector = Property::new("date-formatter", ValueKind::Selector)
        .constraint(date_formatter)
        .from_locale(|locale| date_selector(locale, DATE_FORMAT_PATTERN));
    DATE_PARSER: Selector = Property::new("date-parser", ValueKind::Selector)
        .constraint(date_parser)
        .from_locale(|locale| date_selector(locale, DATE_PARSE_PATTERN));
    DATE_TIME_FORMATTER: Selector = Property::new("date-time-formatter", ValueKind::Selector)
        .constraint(date_time_formatter)
        .from_locale(|locale| date_time_selector(locale, DATE_TIME_FORMAT_PATTERN));
    /// Days between the serial-date epoch and 1970-01-01.
    DATE_TIME_OFFSET: i64 = Property::new("date-time-offset", ValueKind::I64);
    DATE_TIME_PARSER: Selector = Property::new("date-time-parser", ValueKind::Selector)
        .constraint(date_time_parser)
        .from_locale(|locale| date_time_selector(locale, DATE_TIME_PARSE_PATTERN));
    DECIMAL_SEPARATOR: char = Property::new("decimal-separator", ValueKind::Char)
        .constraint(symbol_char)
        .from_locale(|locale| with_symbols(locale, |s| PropertyValue::Char(s.decimal_separator)));
    /// Year used when a parsed date omits one.
    DEFAULT_YEAR: u32 = Property::new("default-year", ValueKind::U32).constraint(default_year);
    EXPONENT_SYMBOL: String = Property::new("exponent-symbol", ValueKind::Text)
        .from_locale(|locale| with_symbols(locale, |_| PropertyValue::Text("E".to_string())));
    EXPRESSION_NUMBER_KIND: ExpressionNumberKind =
        Property::new("expression-number-kind", ValueKind::ExpressionNumberKind);
    FORMATTERS: AliasSet = Property::new("formatters", ValueKind::Aliases);
    FROZEN_COLUMNS: u32 =
        Property::new("frozen-columns", ValueKind::U32).document().constraint(frozen_columns);
    FROZEN_ROWS: u32 =
        Property::new("frozen-rows", ValueKind::U32).document().constraint(frozen_rows);
    FUNCTIONS: AliasSet = Property::new("functions", ValueKind::Aliases);
    /// Significant digits shown by the `General` number format.
    GENERAL_NUMBER_FORMAT_DIGITS: u32 =
        Property::new("general-number-format-digits", ValueKind::U32).constraint(at_least_one);
    GROUPING_SEPARATOR: char = Property::new("grouping-separator", ValueKind::Char)
        .constraint(symbol_char)
        .from_locale(|locale| with_symbols(locale, |s| PropertyValue::Char(s.grouping_separator)));
    HIDE_ZERO_VALUES: bool = Property::new("hide-zero-values", ValueKind::Bool);
    /// Always stored locally once set, even when the defaults carry the same locale.
    LOCALE: LocaleTag = Property::new("locale", ValueKind::Locale)
        .pinned()
        .from_locale(|locale| Some(PropertyValue::Locale(locale.clone())));
    NEGATIVE_SIGN: char = Property::new("negative-sign", ValueKind::Char)
        .constraint(symbol_char)
        .from_locale(|locale| with_symbols(locale, |_| PropertyValue::Char('-')));
    NUMBER_FORMATTER: Selector = Property::new("number-formatter", ValueKind::Selector)
        .constraint(number_formatter);
    NUMBER_PARSER: Selector =
        Property::new("number-parser", ValueKind::Selector).constraint(number_parser);
    PARSERS: AliasSet = Property::new("parsers", ValueKind::Aliases);
    PERCENTAGE_SYMBOL: char = Property::new("percentage-symbol", ValueKind::Char)
        .constraint(symbol_char)
        .from_locale(|locale| with_symbols(locale, |_| PropertyValue::Char('%')));
    /// Plugins available to this spreadsheet.
    PLUGINS: PluginNameSet = Property::new("plugins", ValueKind::PluginNames);
    POSITIVE_SIGN: char = Property::new("positive-sign", ValueKind::Char)
        .constraint(symbol_char)
        .from_locale(|locale| with_symbols(locale, |_| PropertyValue::Char('+')));
    /// Significant digits kept by arithmetic; `0` means unlimited.
    PRECISION: u32 = Property::new("precision", ValueKind::U32).constraint(precision);
    ROUNDING_MODE: RoundingMode = Property::new("rounding-mode", ValueKind::RoundingMode);
    SPREADSHEET_ID: SpreadsheetId = Property::new("spreadsheet-id", ValueKind::SpreadsheetId)
        .document()
        .sorts_first();
    SPREADSHEET_NAME: String = Property::new("spreadsheet-name", ValueKind::Text)
        .document()
        .constraint(spreadsheet_name);
    TEXT_FORMATTER: Selector =
        Property::new("text-formatter", ValueKind::Selector).constraint(text_formatter);
    TIME_FORMATTER: Selector = Property::new("time-formatter", ValueKind::Selector)
        .constraint(time_formatter)
        .from_locale(|locale| time_selector(locale, TIME_FORMAT_PATTERN));
    TIME_PARSER: Selector = Property::new("time-parser", ValueKind::Selector)
        .constraint(time_parser)
        .from_locale(|locale| time_selector(locale, TIME_PARSE_PATTERN));
    /// Two-digit years at or below this value belong to the current century.
    TWO_DIGIT_YEAR: u32 =
        Property::new("two-digit-year", ValueKind::U32).constraint(two_digit_year);
    /// Separator between function arguments.
    VALUE_SEPARATOR: char = Property::new("value-separator", ValueKind::Char)
        .constraint(symbol_char)
        .from_locale(|locale| with_symbols(locale, |s| PropertyValue::Char(s.value_separator())));
    VIEWPORT: Viewport = Property::new("viewport", ValueKind::Viewport).document();
}

/// Shared descriptor behind every generated `color-<number>` property.
pub(crate) static NUMBERED_COLOR: Property = Property::new("color-", ValueKind::Color);

/// Shared descriptor behind every generated `color-<Name>` property.
pub(crate) static NAMED_COLOR: Property =
    Property::new("color-", ValueKind::U32).constraint(color_number);

fn with_symbols(
    locale: &LocaleTag,
    f: impl FnOnce(&'static LocaleSymbols) -> PropertyValue,
) -> Option<PropertyValue> {
    symbols_for(locale).map(f)
}

fn selector_value(plugin: &str, text: &str) -> Option<PropertyValue> {
    let name = PluginName::new(plugin).ok()?;
    Selector::new(name, text).ok().map(PropertyValue::Selector)
}

fn date_selector(locale: &LocaleTag, plugin: &str) -> Option<PropertyValue> {
    selector_value(plugin, symbols_for(locale)?.date_pattern)
}

fn time_selector(locale: &LocaleTag, plugin: &str) -> Option<PropertyValue> {
    selector_value(plugin, symbols_for(locale)?.time_pattern)
}

fn date_time_selector(locale: &LocaleTag, plugin: &str) -> Option<PropertyValue> {
    selector_value(plugin, &symbols_for(locale)?.date_time_pattern())
}

type Checked = Result<Option<PropertyValue>, String>;

fn u32_in_range(value: &PropertyValue, min: u32, max: u32) -> Checked {
    match value {
        PropertyValue::U32(n) if (min..=max).contains(n) => Ok(None),
        PropertyValue::U32(_) => Err(format!("must be between {min} and {max}")),
        _ => Ok(None),
    }
}

fn at_least_one(value: &PropertyValue) -> Checked {
    u32_in_range(value, 1, u32::MAX)
}

fn precision(value: &PropertyValue) -> Checked {
    u32_in_range(value, 0, PRECISION_MAX)
}

fn color_number(value: &PropertyValue) -> Checked {
    u32_in_range(value, FIRST_COLOR_NUMBER, u32::MAX)
}

fn two_digit_year(value: &PropertyValue) -> Checked {
    u32_in_range(value, 0, TWO_DIGIT_YEAR_MAX)
}

fn default_year(value: &PropertyValue) -> Checked {
    u32_in_range(value, 1, DEFAULT_YEAR_MAX)
}

fn frozen_columns(value: &PropertyValue) -> Checked {
    u32_in_range(value, 0, EXCEL_MAX_COLS)
}

fn frozen_rows(value: &PropertyValue) -> Checked {
    u32_in_range(value, 0, EXCEL_MAX_ROWS)
}

fn symbol_char(value: &PropertyValue) -> Checked {
    match value {
        PropertyValue::Char(c) if c.is_alphanumeric() => {
            Err("letters and digits cannot be used as symbols".to_string())
        }
        _ => Ok(None),
    }
}

fn spreadsheet_name(value: &PropertyValue) -> Checked {
    match value {
        PropertyValue::Text(name) if name.chars().count() > SPREADSHEET_NAME_MAX_LEN => Err(format!(
            "longer than {SPREADSHEET_NAME_MAX_LEN} characters"
        )),
        PropertyValue::Text(name) if name.trim() != name => {
            Ok(Some(PropertyValue::Text(name.trim().to_string())))
        }
        _ => Ok(None),
    }
}

/// Selectors naming a built-in pattern plugin must name the one matching the property. Other
/// plugin names are left to whoever resolves them.
fn pattern_plugin(value: &PropertyValue, expected: &str) -> Checked {
    const BUILTIN: [&str; 9] = [
        NUMBER_FORMAT_PATTERN,
        NUMBER_PARSE_PATTERN,
        DATE_FORMAT_PATTERN,
        DATE_PARSE_PATTERN,
        DATE_TIME_FORMAT_PATTERN,
        DATE_TIME_PARSE_PATTERN,
        TIME_FORMAT_PATTERN,
        TIME_PARSE_PATTERN,
        TEXT_FORMAT_PATTERN,
    ];
    match value {
        PropertyValue::Selector(selector) => {
            let name = selector.name().as_str();
            if name != expected && BUILTIN.contains(&name) {
                Err(format!("expected a {expected} selector, got {name}"))
            } else {
                Ok(None)
            }
        }
        _ => Ok(None),
    }
}

fn date_formatter(value: &PropertyValue) -> Checked {
    pattern_plugin(value, DATE_FORMAT_PATTERN)
}

fn date_parser(value: &PropertyValue) -> Checked {
    pattern_plugin(value, DATE_PARSE_PATTERN)
}

fn date_time_formatter(value: &PropertyValue) -> Checked {
    pattern_plugin(value, DATE_TIME_FORMAT_PATTERN)
}

fn date_time_parser(value: &PropertyValue) -> Checked {
    pattern_plugin(value, DATE_TIME_PARSE_PATTERN)
}

fn number_formatter(value: &PropertyValue) -> Checked {
    pattern_plugin(value, NUMBER_FORMAT_PATTERN)
}

fn number_parser(value: &PropertyValue) -> Checked {
    pattern_plugin(value, NUMBER_PARSE_PATTERN)
}

fn text_formatter(value: &PropertyValue) -> Checked {
    pattern_plugin(value, TEXT_FORMAT_PATTERN)
}

fn time_formatter(value: &PropertyValue) -> Checked {
    pattern_plugin(value, TIME_FORMAT_PATTERN)
}

fn time_parser(value: &PropertyValue) -> Checked {
    pattern_plugin(value, TIME_PARSE_PATTERN)
}
