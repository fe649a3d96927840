//! Argument name to endpoint key conversion.
//!
//! A single argument is exposed to the build tool through up to three
//! endpoints: an environment (substitution) key, a command-line variable key
//! and a command-line option key. Each endpoint has its own prefix, suffix
//! and transform so tables can be reused under different naming conventions.

use crate::error::ArgsError;
use std::{fmt, sync::Arc};

pub type NameFn = dyn Fn(&str) -> String + Send + Sync;

#[derive(Clone, Default)]
pub enum KeyTransform {
    /// Use the argument name as is.
    #[default]
    Identity,
    /// Do not declare this endpoint at all.
    Disabled,
    Custom(Arc<NameFn>),
}

impl KeyTransform {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        KeyTransform::Custom(Arc::new(f))
    }

    /// Resolve a transform by name, as used in config files.
    pub fn from_name(key_space: &str, value: &str) -> Result<Self, ArgsError> {
        match value {
            "identity" => Ok(KeyTransform::Identity),
            "disabled" => Ok(KeyTransform::Disabled),
            "lower" => Ok(KeyTransform::custom(|s| s.to_lowercase())),
            "upper" => Ok(KeyTransform::custom(|s| s.to_uppercase())),
            _ => Err(ArgsError::MisconfiguredTransform {
                key_space: key_space.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, KeyTransform::Disabled)
    }

    fn apply(&self, name: &str) -> Option<String> {
        match self {
            KeyTransform::Identity => Some(name.to_string()),
            KeyTransform::Disabled => None,
            KeyTransform::Custom(f) => Some(f(name)),
        }
    }
}

impl fmt::Debug for KeyTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyTransform::Identity => write!(f, "Identity"),
            KeyTransform::Disabled => write!(f, "Disabled"),
            KeyTransform::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Prefix, suffix and transform of one key space.
#[derive(Debug, Clone, Default)]
pub struct KeyConv {
    pub prefix: String,
    pub suffix: String,
    pub transform: KeyTransform,
}

impl KeyConv {
    pub fn disabled() -> Self {
        KeyConv {
            transform: KeyTransform::Disabled,
            ..Default::default()
        }
    }

    pub fn key(&self, name: &str) -> Option<String> {
        self.transform
            .apply(name)
            .map(|n| format!("{}{}{}", self.prefix, n, self.suffix))
    }
}

/// Spelling of the command-line option flag, e.g. `--install-data`.
#[derive(Clone)]
pub struct OptionConv {
    pub prefix: String,
    pub name_prefix: String,
    pub name_suffix: String,
    /// Replaces [`flagify`] when set.
    pub transform: Option<Arc<NameFn>>,
}

impl Default for OptionConv {
    fn default() -> Self {
        OptionConv {
            prefix: "--".to_string(),
            name_prefix: String::new(),
            name_suffix: String::new(),
            transform: None,
        }
    }
}

impl fmt::Debug for OptionConv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionConv")
            .field("prefix", &self.prefix)
            .field("name_prefix", &self.name_prefix)
            .field("name_suffix", &self.name_suffix)
            .field("transform", &self.transform.as_ref().map(|_| ".."))
            .finish()
    }
}

impl OptionConv {
    pub fn flag(&self, name: &str) -> String {
        let name = match &self.transform {
            Some(f) => f(name),
            None => flagify(name),
        };
        format!("{}{}{}{}", self.prefix, self.name_prefix, name, self.name_suffix)
    }
}

/// Name conversion for all three endpoints plus the option flag.
#[derive(Debug, Clone, Default)]
pub struct NameConv {
    pub env_key: KeyConv,
    pub var_key: KeyConv,
    pub opt_key: KeyConv,
    pub option: OptionConv,
}

impl NameConv {
    pub fn env_key(&self, name: &str) -> Option<String> {
        self.env_key.key(name)
    }

    pub fn var_key(&self, name: &str) -> Option<String> {
        self.var_key.key(name)
    }

    pub fn opt_key(&self, name: &str) -> Option<String> {
        self.opt_key.key(name)
    }

    /// Option flag, only when the option endpoint is enabled.
    pub fn option(&self, name: &str) -> Option<String> {
        if self.opt_key.transform.is_disabled() {
            return None;
        }
        Some(self.option.flag(name))
    }
}

/// Lower-case `name` and join its words with single dashes.
///
/// Any run of non-alphanumeric characters separates words, leading and
/// trailing separators are dropped: `LEX_OUTPUT_ROOT` -> `lex-output-root`.
pub fn flagify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
