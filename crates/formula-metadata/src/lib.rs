//! `formula-metadata` holds the per-spreadsheet settings of a Formula workbook: locale, number and
//! date symbols, rounding, palette colors, enabled plugins, viewport, and audit information.
//!
//! Settings live in an immutable [`SpreadsheetMetadata`], a sorted set of validated property
//! values with an optional one-level defaults fallback. Properties are addressed through typed
//! [`PropertyKey`]s declared in [`properties`]:
//!
//! ```
//! use formula_metadata::{properties, LocaleTag, SpreadsheetMetadata};
//!
//! let metadata = SpreadsheetMetadata::EMPTY
//!     .set(&properties::LOCALE, LocaleTag::parse("en-US").unwrap())
//!     .unwrap()
//!     .set(&properties::PRECISION, 7)
//!     .unwrap();
//! assert_eq!(metadata.to_json().to_string(), r#"{"locale":"en-US","precision":7}"#);
//! ```

mod address;
mod color;
mod components;
mod document;
mod environment;
mod error;
pub mod locale;
mod metadata;
mod number;
mod plugins;
pub mod properties;
mod property;
pub mod selector;
mod store;
mod value;
mod visitor;
mod wire;

pub use address::{
    A1ParseError, CellRange, CellReference, RangeParseError, EXCEL_MAX_COLS, EXCEL_MAX_ROWS,
};
pub use color::{Color, ColorName, DEFAULT_PALETTE};
pub use components::{DateTimeContext, DecimalNumberContext, MissingComponents};
pub use document::{AuditInfo, DocumentError, SpreadsheetId, Viewport};
pub use environment::EnvironmentContext;
pub use error::{MetadataError, PropertyValueError, Result};
pub use locale::{
    BuiltinLocaleData, DateTimeSymbols, DecimalNumberSymbols, LocaleDataProvider, LocaleTag,
};
pub use metadata::SpreadsheetMetadata;
pub use number::{ExpressionNumberKind, MathContext, RoundingMode};
pub use plugins::{AliasSet, PluginError, PluginName, PluginNameSet};
pub use property::{
    Constraint, LocaleExtractor, Property, PropertyKey, PropertyName, Scope, COLOR_PREFIX,
    FIRST_COLOR_NUMBER, NUMBERED_COLOR_CACHE_SIZE,
};
pub use selector::{Selector, SelectorError};
pub use store::{InMemoryMetadataStore, MetadataStore, StoreError};
pub use value::{PropertyType, PropertyValue, ValueKind};
pub use visitor::{ColorTable, MetadataVisitor, PluginTable};
pub use wire::DEFAULTS_FIELD;
