//! Selectors name a pluggable formatter/parser implementation plus its configuration text.
//!
//! On the wire a selector is a single string: the plugin name, optionally followed by a space
//! and the configuration text, e.g. `number-format-pattern #,##0.00`.

use core::fmt;

use thiserror::Error;

use crate::plugins::PluginName;

pub const NUMBER_FORMAT_PATTERN: &str = "number-format-pattern";
pub const NUMBER_PARSE_PATTERN: &str = "number-parse-pattern";
pub const DATE_FORMAT_PATTERN: &str = "date-format-pattern";
pub const DATE_PARSE_PATTERN: &str = "date-parse-pattern";
pub const DATE_TIME_FORMAT_PATTERN: &str = "date-time-format-pattern";
pub const DATE_TIME_PARSE_PATTERN: &str = "date-time-parse-pattern";
pub const TIME_FORMAT_PATTERN: &str = "time-format-pattern";
pub const TIME_PARSE_PATTERN: &str = "time-parse-pattern";
pub const TEXT_FORMAT_PATTERN: &str = "text-format-pattern";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,
    #[error("invalid plugin name {0:?}")]
    InvalidName(String),
    #[error("invalid pattern: {0}")]
    Pattern(#[from] PatternError),
}

/// A plugin name with configuration text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector {
    name: PluginName,
    text: String,
}

impl Selector {
    /// Build a selector, validating the configuration text for the built-in pattern plugins.
    pub fn new(name: PluginName, text: impl Into<String>) -> Result<Self, SelectorError> {
        let selector = Self {
            name,
            text: text.into(),
        };
        selector.validate()?;
        Ok(selector)
    }

    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        let trimmed = text.trim_start();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }
        let (name, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        let name = PluginName::new(name).map_err(|_| SelectorError::InvalidName(name.to_string()))?;
        Self::new(name, rest)
    }

    pub fn name(&self) -> &PluginName {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn validate(&self) -> Result<(), PatternError> {
        match self.name.as_str() {
            NUMBER_FORMAT_PATTERN | NUMBER_PARSE_PATTERN => validate_number_pattern(&self.text),
            DATE_FORMAT_PATTERN | DATE_PARSE_PATTERN | DATE_TIME_FORMAT_PATTERN
            | DATE_TIME_PARSE_PATTERN | TIME_FORMAT_PATTERN | TIME_PARSE_PATTERN => {
                validate_date_time_pattern(&self.text)
            }
            TEXT_FORMAT_PATTERN => validate_text_pattern(&self.text),
            // Third-party plugins own their configuration syntax.
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, self.text)
        }
    }
}

/// Reasons an Excel-style format pattern is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,
    #[error("unterminated quoted literal")]
    UnterminatedQuote,
    #[error("unterminated bracket token")]
    UnterminatedBracket,
    #[error("'{0}' must be followed by a character")]
    DanglingEscape(char),
    #[error("pattern has more than 4 sections")]
    TooManySections,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("more than one decimal point in a section")]
    MultipleDecimalPoints,
    #[error("exponent must be followed by '+' or '-'")]
    InvalidExponent,
    #[error("pattern has no digit placeholder")]
    MissingDigits,
    #[error("pattern has no date or time component")]
    MissingDateTime,
    #[error("text pattern must contain '@'")]
    MissingTextPlaceholder,
}

#[derive(Debug)]
enum Token {
    Literal,
    Bracket(String),
    Char(char),
    SectionBreak,
}

/// Split a pattern into tokens, resolving quotes, escapes, fills, and bracket tokens.
fn tokenize(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(PatternError::UnterminatedQuote);
                }
                tokens.push(Token::Literal);
            }
            '\\' | '_' | '*' => {
                if chars.next().is_none() {
                    return Err(PatternError::DanglingEscape(ch));
                }
                tokens.push(Token::Literal);
            }
            '[' => {
                let mut content = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    content.push(c);
                }
                if !closed {
                    return Err(PatternError::UnterminatedBracket);
                }
                tokens.push(Token::Bracket(content));
            }
            ';' => tokens.push(Token::SectionBreak),
            other => tokens.push(Token::Char(other)),
        }
    }

    let sections = tokens
        .iter()
        .filter(|t| matches!(t, Token::SectionBreak))
        .count()
        + 1;
    if sections > 4 {
        return Err(PatternError::TooManySections);
    }
    Ok(tokens)
}

fn is_literal_char(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '$' | '-' | '+' | '(' | ')' | ':' | '/' | '!' | '^' | '&' | '\'' | '~' | '{' | '}'
            | '<' | '>' | '=' | '\u{00A0}' | '€' | '£' | '¥'
    )
}

/// Validate an Excel-style number pattern such as `#,##0.00;(#,##0.00)`.
pub fn validate_number_pattern(pattern: &str) -> Result<(), PatternError> {
    if pattern.trim().is_empty() {
        return Err(PatternError::Empty);
    }
    if pattern.eq_ignore_ascii_case("General") {
        return Ok(());
    }

    let tokens = tokenize(pattern)?;
    let mut has_digits = false;
    let mut decimal_points = 0;
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        match token {
            Token::SectionBreak => decimal_points = 0,
            Token::Literal | Token::Bracket(_) => {}
            Token::Char(ch) => match ch {
                '0' | '#' | '?' => has_digits = true,
                '.' => {
                    decimal_points += 1;
                    if decimal_points > 1 {
                        return Err(PatternError::MultipleDecimalPoints);
                    }
                }
                'E' | 'e' => match iter.next() {
                    Some(Token::Char('+' | '-')) => {}
                    _ => return Err(PatternError::InvalidExponent),
                },
                ',' | '%' | '@' => {}
                c if c.is_ascii_digit() => {}
                c if is_literal_char(*c) => {}
                c => return Err(PatternError::UnexpectedChar(*c)),
            },
        }
    }

    if !has_digits {
        return Err(PatternError::MissingDigits);
    }
    Ok(())
}

/// Validate an Excel-style date, time, or date-time pattern such as `dd/mm/yyyy hh:mm`.
pub fn validate_date_time_pattern(pattern: &str) -> Result<(), PatternError> {
    if pattern.trim().is_empty() {
        return Err(PatternError::Empty);
    }

    let tokens = tokenize(pattern)?;
    let mut has_component = false;
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        match token {
            Token::SectionBreak | Token::Literal => {}
            Token::Bracket(content) => {
                // Elapsed time tokens: `[h]`, `[mm]`, `[ss]`.
                let lower = content.to_ascii_lowercase();
                if !lower.is_empty() && lower.chars().all(|c| matches!(c, 'h' | 'm' | 's')) {
                    has_component = true;
                }
            }
            Token::Char(ch) => match ch.to_ascii_lowercase() {
                'y' | 'm' | 'd' | 'h' | 's' => has_component = true,
                'a' => {
                    // `AM/PM` or `A/P`; anything else is an error.
                    let mut rest = String::new();
                    while let Some(Token::Char(c)) = iter.peek() {
                        if !matches!(c.to_ascii_lowercase(), 'm' | '/' | 'p') {
                            break;
                        }
                        rest.push(c.to_ascii_lowercase());
                        iter.next();
                        if rest == "m/pm" || rest == "/p" {
                            break;
                        }
                    }
                    if rest != "m/pm" && rest != "/p" {
                        return Err(PatternError::UnexpectedChar(*ch));
                    }
                }
                '0' | '.' | ',' | '@' => {}
                c if is_literal_char(c) => {}
                _ => return Err(PatternError::UnexpectedChar(*ch)),
            },
        }
    }

    if !has_component {
        return Err(PatternError::MissingDateTime);
    }
    Ok(())
}

/// Validate a text pattern; the value is substituted at `@`.
pub fn validate_text_pattern(pattern: &str) -> Result<(), PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }
    let tokens = tokenize(pattern)?;
    if tokens.iter().any(|t| matches!(t, Token::Char('@'))) {
        Ok(())
    } else {
        Err(PatternError::MissingTextPlaceholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_number_patterns() {
        for pattern in [
            "General",
            "0",
            "#,##0.00",
            "0%",
            "0.00E+00",
            "#,##0.00;(#,##0.00)",
            "[Red]0.00;[Color10]-0.00;\"zero\"",
            "_($* #,##0.00_)",
            "[$€-407] #,##0.00",
        ] {
            assert_eq!(validate_number_pattern(pattern), Ok(()), "{pattern}");
        }
    }

    #[test]
    fn rejects_broken_number_patterns() {
        assert_eq!(validate_number_pattern(""), Err(PatternError::Empty));
        assert_eq!(
            validate_number_pattern("0.0.0"),
            Err(PatternError::MultipleDecimalPoints)
        );
        assert_eq!(
            validate_number_pattern("\"abc"),
            Err(PatternError::UnterminatedQuote)
        );
        assert_eq!(
            validate_number_pattern("[Red0"),
            Err(PatternError::UnterminatedBracket)
        );
        assert_eq!(validate_number_pattern("0E0"), Err(PatternError::InvalidExponent));
        assert_eq!(
            validate_number_pattern("0;0;0;0;0"),
            Err(PatternError::TooManySections)
        );
        assert_eq!(
            validate_number_pattern("yyyy"),
            Err(PatternError::UnexpectedChar('y'))
        );
        assert_eq!(validate_number_pattern("\"x\""), Err(PatternError::MissingDigits));
        assert_eq!(
            validate_number_pattern("0\\"),
            Err(PatternError::DanglingEscape('\\'))
        );
    }

    #[test]
    fn date_time_patterns() {
        assert_eq!(validate_date_time_pattern("m/d/yyyy"), Ok(()));
        assert_eq!(validate_date_time_pattern("h:mm:ss AM/PM"), Ok(()));
        assert_eq!(validate_date_time_pattern("h:mm A/P"), Ok(()));
        assert_eq!(validate_date_time_pattern("[h]:mm"), Ok(()));
        assert_eq!(validate_date_time_pattern("dd.mm.yyyy hh:mm:ss.000"), Ok(()));
        assert_eq!(
            validate_date_time_pattern("0.00"),
            Err(PatternError::MissingDateTime)
        );
        assert_eq!(
            validate_date_time_pattern("dd/qq"),
            Err(PatternError::UnexpectedChar('q'))
        );
        assert_eq!(
            validate_date_time_pattern("h AX"),
            Err(PatternError::UnexpectedChar('A'))
        );
    }

    #[test]
    fn selector_text_round_trips() {
        let selector = Selector::parse("number-format-pattern #,##0.00").unwrap();
        assert_eq!(selector.name().as_str(), NUMBER_FORMAT_PATTERN);
        assert_eq!(selector.text(), "#,##0.00");
        assert_eq!(selector.to_string(), "number-format-pattern #,##0.00");

        let bare = Selector::parse("general").unwrap();
        assert_eq!(bare.text(), "");
        assert_eq!(bare.to_string(), "general");

        assert!(matches!(
            Selector::parse("number-format-pattern 0.0.0"),
            Err(SelectorError::Pattern(PatternError::MultipleDecimalPoints))
        ));
        assert_eq!(Selector::parse("  "), Err(SelectorError::Empty));
        assert!(matches!(
            Selector::parse("9lives x"),
            Err(SelectorError::InvalidName(_))
        ));
    }
}
