use core::fmt;
use std::sync::Arc;

/// A normalized BCP-47 locale tag such as `en-US`.
///
/// Parsing accepts the spellings seen in the wild (`en_us`, `en_US.UTF-8`, `de_DE@euro`,
/// `fr-FR-u-nu-latn`) and canonicalizes casing: lower-case language, title-case script,
/// upper-case region.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleTag(Arc<str>);

impl LocaleTag {
    pub fn parse(text: &str) -> Result<Self, &'static str> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err("locale tag is empty");
        }

        let mut key: String = trimmed
            .chars()
            .map(|ch| if ch == '_' { '-' } else { ch })
            .collect();

        // POSIX encoding / modifier suffixes.
        if let Some(idx) = key.find('.') {
            key.truncate(idx);
        }
        if let Some(idx) = key.find('@') {
            key.truncate(idx);
        }
        // BCP-47 extensions only carry formatting hints we do not model.
        let lower = key.to_ascii_lowercase();
        if let Some(idx) = lower.find("-u-").or_else(|| lower.find("-x-")) {
            key.truncate(idx);
        }

        let mut out = String::with_capacity(key.len());
        for (idx, part) in key.split('-').enumerate() {
            if part.is_empty() || part.len() > 8 || !part.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err("locale tag contains an invalid subtag");
            }
            if idx == 0 {
                if !(2..=3).contains(&part.len())
                    || !part.chars().all(|c| c.is_ascii_alphabetic())
                {
                    return Err("locale tag must start with a 2 or 3 letter language");
                }
                out.push_str(&part.to_ascii_lowercase());
                continue;
            }

            out.push('-');
            let is_alpha = part.chars().all(|c| c.is_ascii_alphabetic());
            if part.len() == 2 && is_alpha {
                out.push_str(&part.to_ascii_uppercase());
            } else if part.len() == 4 && is_alpha {
                let mut chars = part.chars();
                if let Some(first) = chars.next() {
                    out.push(first.to_ascii_uppercase());
                }
                out.extend(chars.map(|c| c.to_ascii_lowercase()));
            } else {
                out.push_str(&part.to_ascii_lowercase());
            }
        }

        Ok(Self(Arc::from(out)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or("")
    }

    /// The two-letter region subtag, if present.
    pub fn region(&self) -> Option<&str> {
        self.0
            .split('-')
            .skip(1)
            .find(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_uppercase()))
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Date component order used when interpreting ambiguous numeric dates like `1/2/2024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    MDY,
    DMY,
    YMD,
}

/// Month/weekday names shared by every region of a language.
#[derive(Debug, PartialEq, Eq)]
pub struct LanguageNames {
    pub month_names: [&'static str; 12],
    pub month_abbreviations: [&'static str; 12],
    pub weekday_names: [&'static str; 7],
    pub weekday_abbreviations: [&'static str; 7],
    pub am_pm: [&'static str; 2],
}

/// Built-in symbol data for one supported locale.
#[derive(Debug, PartialEq, Eq)]
pub struct LocaleSymbols {
    pub id: &'static str,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub currency_symbol: &'static str,
    pub date_order: DateOrder,
    /// Excel-style short date pattern.
    pub date_pattern: &'static str,
    pub time_pattern: &'static str,
    pub names: &'static LanguageNames,
}

impl LocaleSymbols {
    pub fn date_time_pattern(&self) -> String {
        format!("{} {}", self.date_pattern, self.time_pattern)
    }

    /// Function argument / list separator: `;` wherever `,` is the decimal separator.
    pub fn value_separator(&self) -> char {
        if self.decimal_separator == ',' {
            ';'
        } else {
            ','
        }
    }
}

static ENGLISH: LanguageNames = LanguageNames {
    month_names: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    month_abbreviations: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    weekday_names: [
        "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
    ],
    weekday_abbreviations: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    am_pm: ["AM", "PM"],
};

static GERMAN: LanguageNames = LanguageNames {
    month_names: [
        "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
        "Oktober", "November", "Dezember",
    ],
    month_abbreviations: [
        "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
    ],
    weekday_names: [
        "Sonntag", "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag",
    ],
    weekday_abbreviations: ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"],
    am_pm: ["AM", "PM"],
};

static FRENCH: LanguageNames = LanguageNames {
    month_names: [
        "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
        "octobre", "novembre", "décembre",
    ],
    month_abbreviations: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
        "déc.",
    ],
    weekday_names: [
        "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
    ],
    weekday_abbreviations: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
    am_pm: ["AM", "PM"],
};

static SPANISH: LanguageNames = LanguageNames {
    month_names: [
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
        "octubre", "noviembre", "diciembre",
    ],
    month_abbreviations: [
        "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
    ],
    weekday_names: [
        "domingo", "lunes", "martes", "miércoles", "jueves", "viernes", "sábado",
    ],
    weekday_abbreviations: ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"],
    am_pm: ["a. m.", "p. m."],
};

static ITALIAN: LanguageNames = LanguageNames {
    month_names: [
        "gennaio", "febbraio", "marzo", "aprile", "maggio", "giugno", "luglio", "agosto",
        "settembre", "ottobre", "novembre", "dicembre",
    ],
    month_abbreviations: [
        "gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic",
    ],
    weekday_names: [
        "domenica", "lunedì", "martedì", "mercoledì", "giovedì", "venerdì", "sabato",
    ],
    weekday_abbreviations: ["dom", "lun", "mar", "mer", "gio", "ven", "sab"],
    am_pm: ["AM", "PM"],
};

pub static EN_US: LocaleSymbols = LocaleSymbols {
    id: "en-US",
    decimal_separator: '.',
    grouping_separator: ',',
    currency_symbol: "$",
    date_order: DateOrder::MDY,
    date_pattern: "m/d/yyyy",
    time_pattern: "h:mm:ss AM/PM",
    names: &ENGLISH,
};

/// British English shares separators with `en-US` but writes dates day-first.
pub static EN_GB: LocaleSymbols = LocaleSymbols {
    id: "en-GB",
    decimal_separator: '.',
    grouping_separator: ',',
    currency_symbol: "£",
    date_order: DateOrder::DMY,
    date_pattern: "dd/mm/yyyy",
    time_pattern: "hh:mm:ss",
    names: &ENGLISH,
};

pub static DE_DE: LocaleSymbols = LocaleSymbols {
    id: "de-DE",
    decimal_separator: ',',
    grouping_separator: '.',
    currency_symbol: "€",
    date_order: DateOrder::DMY,
    date_pattern: "dd.mm.yyyy",
    time_pattern: "hh:mm:ss",
    names: &GERMAN,
};

/// Swiss-style separators (`'` grouping, `.` decimal).
pub static DE_CH: LocaleSymbols = LocaleSymbols {
    id: "de-CH",
    decimal_separator: '.',
    grouping_separator: '\'',
    currency_symbol: "CHF",
    date_order: DateOrder::DMY,
    date_pattern: "dd.mm.yyyy",
    time_pattern: "hh:mm:ss",
    names: &GERMAN,
};

/// French (France) groups with U+00A0 NO-BREAK SPACE.
pub static FR_FR: LocaleSymbols = LocaleSymbols {
    id: "fr-FR",
    decimal_separator: ',',
    grouping_separator: '\u{00A0}',
    currency_symbol: "€",
    date_order: DateOrder::DMY,
    date_pattern: "dd/mm/yyyy",
    time_pattern: "hh:mm:ss",
    names: &FRENCH,
};

pub static FR_CH: LocaleSymbols = LocaleSymbols {
    id: "fr-CH",
    decimal_separator: '.',
    grouping_separator: '\'',
    currency_symbol: "CHF",
    date_order: DateOrder::DMY,
    date_pattern: "dd.mm.yyyy",
    time_pattern: "hh:mm:ss",
    names: &FRENCH,
};

pub static ES_ES: LocaleSymbols = LocaleSymbols {
    id: "es-ES",
    decimal_separator: ',',
    grouping_separator: '.',
    currency_symbol: "€",
    date_order: DateOrder::DMY,
    date_pattern: "dd/mm/yyyy",
    time_pattern: "h:mm:ss",
    names: &SPANISH,
};

/// Spanish (Mexico) uses `.` for decimals and `,` for grouping.
pub static ES_MX: LocaleSymbols = LocaleSymbols {
    id: "es-MX",
    decimal_separator: '.',
    grouping_separator: ',',
    currency_symbol: "$",
    date_order: DateOrder::DMY,
    date_pattern: "dd/mm/yyyy",
    time_pattern: "hh:mm:ss",
    names: &SPANISH,
};

pub static IT_IT: LocaleSymbols = LocaleSymbols {
    id: "it-IT",
    decimal_separator: ',',
    grouping_separator: '.',
    currency_symbol: "€",
    date_order: DateOrder::DMY,
    date_pattern: "dd/mm/yyyy",
    time_pattern: "hh:mm:ss",
    names: &ITALIAN,
};

pub static IT_CH: LocaleSymbols = LocaleSymbols {
    id: "it-CH",
    decimal_separator: '.',
    grouping_separator: '\'',
    currency_symbol: "CHF",
    date_order: DateOrder::DMY,
    date_pattern: "dd.mm.yyyy",
    time_pattern: "hh:mm:ss",
    names: &ITALIAN,
};

pub(crate) static ALL: [&LocaleSymbols; 10] = [
    &EN_US, &EN_GB, &DE_DE, &DE_CH, &FR_FR, &FR_CH, &ES_ES, &ES_MX, &IT_IT, &IT_CH,
];

/// Look up built-in symbols, falling back to the language's primary region for variants we don't
/// list explicitly (e.g. `fr-CA` -> `fr-FR`, `de-AT` -> `de-DE`).
pub fn symbols_for(locale: &LocaleTag) -> Option<&'static LocaleSymbols> {
    let exact = match (locale.language(), locale.region()) {
        ("en", Some("GB") | Some("UK")) => Some(&EN_GB),
        ("de", Some("CH")) => Some(&DE_CH),
        ("fr", Some("CH")) => Some(&FR_CH),
        ("es", Some("MX")) => Some(&ES_MX),
        ("it", Some("CH")) => Some(&IT_CH),
        _ => None,
    };
    exact.or(match locale.language() {
        "en" => Some(&EN_US),
        "de" => Some(&DE_DE),
        "fr" => Some(&FR_FR),
        "es" => Some(&ES_ES),
        "it" => Some(&IT_IT),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(text: &str) -> String {
        LocaleTag::parse(text).unwrap().as_str().to_string()
    }

    #[test]
    fn normalizes_common_spellings() {
        assert_eq!(tag("en-us"), "en-US");
        assert_eq!(tag("en_US"), "en-US");
        assert_eq!(tag("en_US.UTF-8"), "en-US");
        assert_eq!(tag("de_DE@euro"), "de-DE");
        assert_eq!(tag("fr-FR-u-nu-latn"), "fr-FR");
        assert_eq!(tag("zh-hant-tw"), "zh-Hant-TW");
        assert_eq!(tag("EN"), "en");
        assert!(LocaleTag::parse("").is_err());
        assert!(LocaleTag::parse("e").is_err());
        assert!(LocaleTag::parse("en--US").is_err());
        assert!(LocaleTag::parse("12-US").is_err());
    }

    #[test]
    fn symbols_fall_back_to_language_region() {
        let lookup = |text: &str| symbols_for(&LocaleTag::parse(text).unwrap()).map(|s| s.id);
        assert_eq!(lookup("en"), Some("en-US"));
        assert_eq!(lookup("en-AU"), Some("en-US"));
        assert_eq!(lookup("en_uk"), Some("en-GB"));
        assert_eq!(lookup("de-AT"), Some("de-DE"));
        assert_eq!(lookup("de_ch"), Some("de-CH"));
        assert_eq!(lookup("fr-CA"), Some("fr-FR"));
        assert_eq!(lookup("es-AR"), Some("es-ES"));
        assert_eq!(lookup("es-MX"), Some("es-MX"));
        assert_eq!(lookup("ja-JP"), None);
    }

    #[test]
    fn value_separator_avoids_decimal_comma() {
        assert_eq!(EN_US.value_separator(), ',');
        assert_eq!(DE_DE.value_separator(), ';');
        assert_eq!(DE_CH.value_separator(), ',');
    }
}
