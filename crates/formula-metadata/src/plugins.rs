use core::fmt;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use thiserror::Error;

pub const PLUGIN_NAME_MAX_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
    #[error("plugin name is empty")]
    EmptyName,
    #[error("plugin name exceeds 255 characters")]
    NameTooLong,
    #[error("plugin name {0:?} must start with a letter and contain only letters, digits, or '-'")]
    InvalidName(String),
    #[error("duplicate plugin name {0:?}")]
    Duplicate(String),
    #[error("alias entry {0:?} must be `name` or `alias name`")]
    InvalidAliasEntry(String),
}

/// Name of a pluggable implementation (function, converter, formatter, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginName(Arc<str>);

impl PluginName {
    pub fn new(name: &str) -> Result<Self, PluginError> {
        if name.is_empty() {
            return Err(PluginError::EmptyName);
        }
        if name.chars().count() > PLUGIN_NAME_MAX_LEN {
            return Err(PluginError::NameTooLong);
        }
        let mut chars = name.chars();
        let valid_start = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(PluginError::InvalidName(name.to_string()));
        }
        Ok(Self(Arc::from(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn split_entries(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}

/// An ordered, duplicate-free set of plugin names, written as `a, b, c`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PluginNameSet(BTreeSet<PluginName>);

impl PluginNameSet {
    pub fn parse(text: &str) -> Result<Self, PluginError> {
        let mut names = BTreeSet::new();
        for entry in split_entries(text) {
            let name = PluginName::new(entry)?;
            if !names.insert(name) {
                return Err(PluginError::Duplicate(entry.to_string()));
            }
        }
        Ok(Self(names))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n.as_str() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginName> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<PluginName> for PluginNameSet {
    fn from_iter<I: IntoIterator<Item = PluginName>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for PluginNameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, name) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}")?;
        }
        Ok(())
    }
}

/// A named subset of available plugins, optionally renaming some of them.
///
/// Written as comma-separated entries; each entry is either `name` (expose the plugin as-is) or
/// `alias name` (expose `name` under `alias`). Every visible name must be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AliasSet {
    /// visible name -> target plugin
    entries: BTreeMap<PluginName, PluginName>,
}

impl AliasSet {
    pub fn parse(text: &str) -> Result<Self, PluginError> {
        let mut entries = BTreeMap::new();
        for entry in split_entries(text) {
            let parts: Vec<&str> = entry.split_whitespace().collect();
            let (visible, target) = match parts.as_slice() {
                [name] => (PluginName::new(name)?, PluginName::new(name)?),
                [alias, name] => (PluginName::new(alias)?, PluginName::new(name)?),
                _ => return Err(PluginError::InvalidAliasEntry(entry.to_string())),
            };
            if entries.contains_key(&visible) {
                return Err(PluginError::Duplicate(visible.to_string()));
            }
            entries.insert(visible, target);
        }
        Ok(Self { entries })
    }

    /// Resolve a visible name (alias or plain entry) to the plugin it refers to.
    pub fn resolve(&self, name: &str) -> Option<&PluginName> {
        self.entries
            .iter()
            .find(|(visible, _)| visible.as_str() == name)
            .map(|(_, target)| target)
    }

    /// Plugins referenced by this set, whether aliased or not.
    pub fn targets(&self) -> BTreeSet<&PluginName> {
        self.entries.values().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for AliasSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (visible, target)) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            if visible == target {
                write!(f, "{visible}")?;
            } else {
                write!(f, "{visible} {target}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_name_rules() {
        assert!(PluginName::new("number-format-pattern").is_ok());
        assert_eq!(PluginName::new(""), Err(PluginError::EmptyName));
        assert!(matches!(
            PluginName::new("-abc"),
            Err(PluginError::InvalidName(_))
        ));
        assert!(matches!(
            PluginName::new("a b"),
            Err(PluginError::InvalidName(_))
        ));
        assert_eq!(
            PluginName::new(&"a".repeat(256)),
            Err(PluginError::NameTooLong)
        );
    }

    #[test]
    fn name_set_is_sorted_and_unique() {
        let set = PluginNameSet::parse("zeta, alpha ,beta").unwrap();
        assert_eq!(set.to_string(), "alpha, beta, zeta");
        assert!(set.contains("beta"));
        assert_eq!(
            PluginNameSet::parse("a, a"),
            Err(PluginError::Duplicate("a".to_string()))
        );
        assert!(PluginNameSet::parse("").unwrap().is_empty());
    }

    #[test]
    fn alias_set_resolves_aliases() {
        let aliases = AliasSet::parse("sum, total sum, avg average").unwrap();
        assert_eq!(aliases.resolve("total").map(PluginName::as_str), Some("sum"));
        assert_eq!(aliases.resolve("sum").map(PluginName::as_str), Some("sum"));
        assert_eq!(aliases.resolve("average"), None);
        assert_eq!(aliases.to_string(), "avg average, sum, total sum");
        assert_eq!(aliases.targets().len(), 2);

        assert_eq!(
            AliasSet::parse("a x, a y"),
            Err(PluginError::Duplicate("a".to_string()))
        );
        assert!(matches!(
            AliasSet::parse("a b c"),
            Err(PluginError::InvalidAliasEntry(_))
        ));
    }
}
