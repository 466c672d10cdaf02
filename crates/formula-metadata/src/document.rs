//! Values that describe one particular spreadsheet and therefore never appear in shared defaults.

use core::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::address::{CellRange, CellReference};

/// Identifies a stored spreadsheet. Written as lower-case hex.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpreadsheetId(pub u64);

impl SpreadsheetId {
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let hex = text.trim();
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DocumentError::InvalidId(text.to_string()));
        }
        u64::from_str_radix(hex, 16)
            .map(Self)
            .map_err(|_| DocumentError::InvalidId(text.to_string()))
    }
}

impl fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("invalid spreadsheet id {0:?}")]
    InvalidId(String),
    #[error("invalid email address {0:?}")]
    InvalidEmail(String),
    #[error("modified timestamp is before created timestamp")]
    ModifiedBeforeCreated,
}

/// Who created and last modified a spreadsheet, and when.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuditInfo {
    pub created_by: String,
    pub created_timestamp: NaiveDateTime,
    pub modified_by: String,
    pub modified_timestamp: NaiveDateTime,
}

impl AuditInfo {
    pub fn new(
        created_by: impl Into<String>,
        created_timestamp: NaiveDateTime,
        modified_by: impl Into<String>,
        modified_timestamp: NaiveDateTime,
    ) -> Result<Self, DocumentError> {
        let info = Self {
            created_by: created_by.into(),
            created_timestamp,
            modified_by: modified_by.into(),
            modified_timestamp,
        };
        info.validate()?;
        Ok(info)
    }

    pub fn validate(&self) -> Result<(), DocumentError> {
        validate_email(&self.created_by)?;
        validate_email(&self.modified_by)?;
        if self.modified_timestamp < self.created_timestamp {
            return Err(DocumentError::ModifiedBeforeCreated);
        }
        Ok(())
    }

    /// Stamp a modification, keeping the creation fields.
    #[must_use]
    pub fn modified(&self, by: impl Into<String>, at: NaiveDateTime) -> Self {
        Self {
            modified_by: by.into(),
            modified_timestamp: at.max(self.created_timestamp),
            ..self.clone()
        }
    }
}

fn validate_email(email: &str) -> Result<(), DocumentError> {
    match email.split_once('@') {
        Some((user, host))
            if !user.is_empty()
                && !host.is_empty()
                && !host.contains('@')
                && !email.chars().any(char::is_whitespace) =>
        {
            Ok(())
        }
        _ => Err(DocumentError::InvalidEmail(email.to_string())),
    }
}

/// Where the UI was scrolled to and what was selected when the spreadsheet was last viewed.
///
/// Both the home cell and the selection are stored as relative references; `$` markers carry no
/// meaning for a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    home: CellReference,
    selection: Option<CellRange>,
}

impl Viewport {
    pub fn new(home: CellReference, selection: Option<CellRange>) -> Self {
        Self {
            home: home.to_relative(),
            selection: selection.map(CellRange::to_relative),
        }
    }

    pub fn home(&self) -> CellReference {
        self.home
    }

    pub fn selection(&self) -> Option<CellRange> {
        self.selection
    }

    /// `true` when the stored references carry no `$` markers.
    pub fn is_normalized(&self) -> bool {
        self.home.is_relative()
            && self
                .selection
                .map_or(true, |s| s.start.is_relative() && s.end.is_relative())
    }
}
