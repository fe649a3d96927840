use crate::error::ArgsError;
use crate::filter::NameFilter;
use crate::nameconv::{KeyConv, NameConv};
use crate::triple::{DefaultValue, TripleTable};

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

/// Fully resolved argument, ready to be registered with the build tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub var_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_key: Option<String>,
    pub default: DefaultValue,
    pub help: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
    #[serde(rename = "type")]
    pub value_type: String,
    pub nargs: usize,
    pub metavar: String,
}

impl Declaration {
    pub fn has_env_decl(&self) -> bool {
        self.env_key.is_some()
    }

    pub fn has_var_decl(&self) -> bool {
        self.var_key.is_some()
    }

    pub fn has_opt_decl(&self) -> bool {
        self.opt_key.is_some()
    }
}

/// Declarations keyed by argument name, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Declarations {
    decls: IndexMap<String, Declaration>,
}

impl Declarations {
    pub fn get(&self, name: &str) -> Result<&Declaration, ArgsError> {
        self.decls
            .get(name)
            .ok_or_else(|| ArgsError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.decls.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.decls.keys().map(|k| k.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Declaration)> {
        self.decls.iter()
    }

    /// Append all of `other`. Fails without modifying `self` if any
    /// argument name is declared on both sides.
    pub fn merge(&mut self, other: Declarations) -> Result<(), ArgsError> {
        if let Some(name) = other.decls.keys().find(|k| self.contains(k)) {
            return Err(ArgsError::Conflict(name.clone()));
        }
        self.decls.extend(other.decls);

        Ok(())
    }
}

impl IntoIterator for Declarations {
    type Item = (String, Declaration);
    type IntoIter = indexmap::map::IntoIter<String, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.decls.into_iter()
    }
}

/// Options of a single [`build`] call.
#[derive(Debug, Clone)]
pub struct DeclOptions {
    /// Replacement defaults, by argument name.
    pub defaults: HashMap<String, DefaultValue>,
    pub name_filter: NameFilter,
    pub nameconv: NameConv,
    pub value_type: String,
    /// Used for every declaration of the call instead of the guessed one.
    pub metavar: Option<String>,
}

impl Default for DeclOptions {
    /// No options are declared unless the opt key space gets enabled.
    fn default() -> Self {
        DeclOptions {
            defaults: HashMap::new(),
            name_filter: NameFilter::All,
            nameconv: NameConv {
                opt_key: KeyConv::disabled(),
                ..Default::default()
            },
            value_type: "string".to_string(),
            metavar: None,
        }
    }
}

impl DeclOptions {
    pub fn with_name_filter(mut self, name_filter: NameFilter) -> Self {
        self.name_filter = name_filter;
        self
    }

    pub fn with_default(mut self, name: impl Into<String>, default: DefaultValue) -> Self {
        self.defaults.insert(name.into(), default);
        self
    }

    pub fn with_nameconv(mut self, nameconv: NameConv) -> Self {
        self.nameconv = nameconv;
        self
    }

    pub fn with_metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar = Some(metavar.into());
        self
    }

    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = value_type.into();
        self
    }
}

/// Guess the command-line metavar from the argument name.
// Only knows about directories and man page extensions.
pub fn guess_metavar(name: &str) -> &'static str {
    if name.ends_with("ext") {
        "EXT"
    } else if name.ends_with("dir") || name == "prefix" || name == "exec_prefix" {
        "DIR"
    } else {
        "X"
    }
}

/// Turn the triples selected by `options.name_filter` into declarations.
pub fn build(table: &TripleTable, options: &DeclOptions) -> Declarations {
    let conv = &options.nameconv;
    let mut decls = IndexMap::new();
    for triple in table.select(&options.name_filter) {
        let name = triple.name.as_str();
        let default = match options.defaults.get(name) {
            Some(d) => d.clone(),
            None => triple.default.clone(),
        };
        let metavar = match &options.metavar {
            Some(m) => m.clone(),
            None => guess_metavar(name).to_string(),
        };
        let decl = Declaration {
            env_key: conv.env_key(name),
            var_key: conv.var_key(name),
            opt_key: conv.opt_key(name),
            default,
            help: triple.description.clone(),
            option: conv.option(name),
            value_type: options.value_type.clone(),
            nargs: 1,
            metavar,
        };
        tracing::trace!(name, ?decl, "declared argument");
        decls.insert(triple.name.clone(), decl);
    }
    tracing::debug!(
        total = table.len(),
        declared = decls.len(),
        "built argument declarations"
    );

    Declarations { decls }
}
