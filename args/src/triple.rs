//! Argument triples: `(name, description, default)`.

use crate::error::ArgsError;
use crate::filter::{filter_names, NameFilter};

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

/// `${name}` references inside a default value
#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("constant regex pattern is valid")
});

/// Default value of an argument.
///
/// Placeholders such as `${prefix}/bin` are kept verbatim, resolving them is
/// left to the build tool consuming the declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Value(String),
    /// No default at all, the variable stays unset unless the user sets it.
    Undefined,
}

impl DefaultValue {
    pub fn value(s: impl Into<String>) -> Self {
        DefaultValue::Value(s.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DefaultValue::Value(v) => Some(v),
            DefaultValue::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, DefaultValue::Undefined)
    }

    /// Names referenced as `${name}`, in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        match self {
            DefaultValue::Value(v) => PLACEHOLDER
                .captures_iter(v)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str())
                .collect(),
            DefaultValue::Undefined => Vec::new(),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(s: &str) -> Self {
        DefaultValue::Value(s.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(s: String) -> Self {
        DefaultValue::Value(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub name: String,
    pub description: String,
    pub default: DefaultValue,
}

impl Triple {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        default: DefaultValue,
    ) -> Self {
        Triple {
            name: name.into(),
            description: description.into(),
            default,
        }
    }
}

/// Ordered, immutable list of triples with unique names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripleTable {
    triples: Vec<Triple>,
}

impl TripleTable {
    pub fn new(triples: Vec<Triple>) -> Result<Self, ArgsError> {
        let mut seen = HashSet::new();
        for t in triples.iter() {
            if !seen.insert(t.name.as_str()) {
                return Err(ArgsError::DuplicateName(t.name.clone()));
            }
        }

        Ok(TripleTable { triples })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Result<&Triple, ArgsError> {
        self.triples
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ArgsError::NotFound(name.to_string()))
    }

    /// Triples accepted by `name_filter`, in table order.
    pub fn select<'a>(&'a self, name_filter: &'a NameFilter) -> impl Iterator<Item = &'a Triple> {
        self.triples.iter().filter(|t| name_filter.accepts(&t.name))
    }

    /// Names accepted by `name_filter`, in table order.
    pub fn names(&self, name_filter: &NameFilter) -> Vec<String> {
        let names = self.triples.iter().map(|t| t.name.as_str());
        filter_names(names, name_filter).into_iter().map(String::from).collect()
    }

    /// Placeholder names used by defaults but not defined in this table.
    ///
    /// These have to be provided by whoever resolves the defaults.
    pub fn external_references(&self) -> Vec<String> {
        let defined: HashSet<&str> = self.triples.iter().map(|t| t.name.as_str()).collect();
        let mut result: Vec<String> = Vec::new();
        for t in self.triples.iter() {
            for name in t.default.placeholders() {
                if !defined.contains(name) && !result.iter().any(|r| r == name) {
                    result.push(name.to_string());
                }
            }
        }

        result
    }
}
