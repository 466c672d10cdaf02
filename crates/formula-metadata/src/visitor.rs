use std::collections::BTreeMap;

use crate::color::{Color, ColorName};
use crate::document::{AuditInfo, SpreadsheetId, Viewport};
use crate::locale::LocaleTag;
use crate::metadata::SpreadsheetMetadata;
use crate::number::{ExpressionNumberKind, RoundingMode};
use crate::plugins::{AliasSet, PluginName, PluginNameSet};
use crate::property::{PropertyKey, PropertyName};
use crate::selector::Selector;
use crate::value::PropertyValue;

/// Receives metadata entries one at a time, routed by property and value type.
///
/// Every method defaults to doing nothing, so a visitor only overrides what it projects.
/// Properties without a dedicated method arrive through [`MetadataVisitor::visit_value`].
pub trait MetadataVisitor {
    fn visit_locale(&mut self, _locale: &LocaleTag) {}

    fn visit_rounding_mode(&mut self, _mode: RoundingMode) {}

    fn visit_expression_number_kind(&mut self, _kind: ExpressionNumberKind) {}

    fn visit_numbered_color(&mut self, _number: u32, _color: Color) {}

    fn visit_named_color(&mut self, _name: &ColorName, _number: u32) {}

    fn visit_plugins(&mut self, _plugins: &PluginNameSet) {}

    /// `name` is the alias-set property, e.g. `functions` or `converters`.
    fn visit_aliases(&mut self, _name: &PropertyName, _aliases: &AliasSet) {}

    fn visit_selector(&mut self, _name: &PropertyName, _selector: &Selector) {}

    fn visit_spreadsheet_id(&mut self, _id: SpreadsheetId) {}

    fn visit_audit_info(&mut self, _info: &AuditInfo) {}

    fn visit_viewport(&mut self, _viewport: &Viewport) {}

    fn visit_value(&mut self, _name: &PropertyName, _value: &PropertyValue) {}
}

impl PropertyName {
    /// Route one `(name, value)` entry to the matching visitor method.
    pub fn accept(&self, value: &PropertyValue, visitor: &mut (impl MetadataVisitor + ?Sized)) {
        if let Some(number) = self.color_number() {
            if let PropertyValue::Color(color) = value {
                visitor.visit_numbered_color(number, *color);
                return;
            }
        }
        if let Some(color) = self.color_name() {
            if let PropertyValue::U32(number) = value {
                visitor.visit_named_color(color, *number);
                return;
            }
        }

        match value {
            PropertyValue::Locale(locale) => visitor.visit_locale(locale),
            PropertyValue::RoundingMode(mode) => visitor.visit_rounding_mode(*mode),
            PropertyValue::ExpressionNumberKind(kind) => {
                visitor.visit_expression_number_kind(*kind)
            }
            PropertyValue::PluginNames(plugins) => visitor.visit_plugins(plugins),
            PropertyValue::Aliases(aliases) => visitor.visit_aliases(self, aliases),
            PropertyValue::Selector(selector) => visitor.visit_selector(self, selector),
            PropertyValue::SpreadsheetId(id) => visitor.visit_spreadsheet_id(*id),
            PropertyValue::AuditInfo(info) => visitor.visit_audit_info(info),
            PropertyValue::Viewport(viewport) => visitor.visit_viewport(viewport),
            PropertyValue::Bool(_)
            | PropertyValue::Char(_)
            | PropertyValue::U32(_)
            | PropertyValue::I64(_)
            | PropertyValue::Text(_)
            | PropertyValue::Color(_) => visitor.visit_value(self, value),
        }
    }
}

/// Lookups between palette numbers, color names, and colors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    by_number: BTreeMap<u32, Color>,
    number_by_name: BTreeMap<ColorName, u32>,
}

impl ColorTable {
    /// Defaults are visited first so local colors and names replace them.
    pub(crate) fn build(metadata: &SpreadsheetMetadata) -> Self {
        let mut table = Self::default();
        metadata.accept_with_defaults(&mut table);
        table
    }

    pub fn color_for_number(&self, number: u32) -> Option<Color> {
        self.by_number.get(&number).copied()
    }

    pub fn color_for_name(&self, name: &ColorName) -> Option<Color> {
        let number = self.number_by_name.get(name)?;
        self.color_for_number(*number)
    }

    /// First name (in name order) assigned to `number`.
    pub fn color_name_for_number(&self, number: u32) -> Option<&ColorName> {
        self.number_by_name
            .iter()
            .find(|(_, n)| **n == number)
            .map(|(name, _)| name)
    }

    pub fn numbers(&self) -> impl Iterator<Item = (u32, Color)> + '_ {
        self.by_number.iter().map(|(n, c)| (*n, *c))
    }
}

impl MetadataVisitor for ColorTable {
    fn visit_numbered_color(&mut self, number: u32, color: Color) {
        self.by_number.insert(number, color);
    }

    fn visit_named_color(&mut self, name: &ColorName, number: u32) {
        self.number_by_name.insert(name.clone(), number);
    }
}

/// The plugins a spreadsheet enables and how each category exposes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginTable {
    plugins: Option<PluginNameSet>,
    aliases: BTreeMap<String, AliasSet>,
    selectors: BTreeMap<String, Selector>,
}

impl PluginTable {
    pub(crate) fn build(metadata: &SpreadsheetMetadata) -> Self {
        let mut table = Self::default();
        metadata.accept_with_defaults(&mut table);
        table
    }

    /// The `plugins` property, if set anywhere.
    pub fn plugins(&self) -> Option<&PluginNameSet> {
        self.plugins.as_ref()
    }

    /// `true` when no plugin list restricts the spreadsheet, or the list names `plugin`.
    pub fn is_enabled(&self, plugin: &PluginName) -> bool {
        self.plugins
            .as_ref()
            .map_or(true, |plugins| plugins.contains(plugin.as_str()))
    }

    pub fn aliases(&self, key: &PropertyKey<AliasSet>) -> Option<&AliasSet> {
        self.aliases.get(key.name().name())
    }

    pub fn selector(&self, key: &PropertyKey<Selector>) -> Option<&Selector> {
        self.selectors.get(key.name().name())
    }

    /// Resolve a visible name in one alias category to an enabled plugin.
    pub fn resolve(&self, key: &PropertyKey<AliasSet>, name: &str) -> Option<&PluginName> {
        self.aliases(key)?
            .resolve(name)
            .filter(|plugin| self.is_enabled(plugin))
    }
}

impl MetadataVisitor for PluginTable {
    fn visit_plugins(&mut self, plugins: &PluginNameSet) {
        self.plugins = Some(plugins.clone());
    }

    fn visit_aliases(&mut self, name: &PropertyName, aliases: &AliasSet) {
        self.aliases.insert(name.name().to_string(), aliases.clone());
    }

    fn visit_selector(&mut self, name: &PropertyName, selector: &Selector) {
        self.selectors.insert(name.name().to_string(), selector.clone());
    }
}
