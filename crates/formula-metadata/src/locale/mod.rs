mod provider;
mod registry;

pub use provider::{BuiltinLocaleData, DateTimeSymbols, DecimalNumberSymbols, LocaleDataProvider};
pub use registry::{
    symbols_for, DateOrder, LanguageNames, LocaleSymbols, LocaleTag, DE_CH, DE_DE, EN_GB, EN_US,
    ES_ES, ES_MX, FR_CH, FR_FR, IT_CH, IT_IT,
};
