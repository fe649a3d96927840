//! Declaration options read from a TOML document.
//!
//! ```toml
//! name_filter = ["prefix", "bindir"]
//! metavar = "PATH"
//!
//! [defaults]
//! prefix = "/usr"
//! AWK = false  # leave the default undefined
//!
//! [env_key]
//! prefix = "GNU_"
//! transform = "upper"
//!
//! [opt_key]
//! transform = true
//!
//! [option]
//! prefix = "-"
//! ```

use crate::decl::DeclOptions;
use crate::error::{ArgsError, ConfigError};
use crate::filter::NameFilter;
use crate::nameconv::{KeyConv, KeyTransform, NameConv, NameFn, OptionConv};
use crate::triple::DefaultValue;

use serde::Deserialize;
use std::{collections::HashMap, ops::Range, sync::Arc};
use toml::Spanned;

/// A transform given either by name or as a plain on/off switch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TransformSpec {
    Enabled(bool),
    Named(String),
}

impl TransformSpec {
    fn key_transform(&self, key_space: &str) -> Result<KeyTransform, ArgsError> {
        match self {
            TransformSpec::Enabled(true) => Ok(KeyTransform::Identity),
            TransformSpec::Enabled(false) => Ok(KeyTransform::Disabled),
            TransformSpec::Named(name) => KeyTransform::from_name(key_space, name),
        }
    }

    fn option_transform(&self) -> Result<Option<Arc<NameFn>>, ArgsError> {
        let f: Arc<NameFn> = match self {
            TransformSpec::Named(name) if name == "flag" => return Ok(None),
            TransformSpec::Named(name) if name == "identity" => Arc::new(|s: &str| s.to_string()),
            TransformSpec::Named(name) if name == "lower" => Arc::new(|s: &str| s.to_lowercase()),
            TransformSpec::Named(name) if name == "upper" => Arc::new(|s: &str| s.to_uppercase()),
            TransformSpec::Named(name) => {
                return Err(ArgsError::MisconfiguredTransform {
                    key_space: "option".to_string(),
                    value: name.clone(),
                })
            }
            TransformSpec::Enabled(b) => {
                return Err(ArgsError::MisconfiguredTransform {
                    key_space: "option".to_string(),
                    value: b.to_string(),
                })
            }
        };

        Ok(Some(f))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDefault {
    Value(String),
    Flag(bool),
}

/// Default value of a `[defaults]` entry: a string, or `false` for none.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDefault")]
pub struct DefaultSpec(pub DefaultValue);

impl TryFrom<RawDefault> for DefaultSpec {
    type Error = String;

    fn try_from(raw: RawDefault) -> Result<Self, Self::Error> {
        match raw {
            RawDefault::Value(v) => Ok(DefaultSpec(DefaultValue::Value(v))),
            RawDefault::Flag(false) => Ok(DefaultSpec(DefaultValue::Undefined)),
            RawDefault::Flag(true) => {
                Err("a default must be a string, or false to leave it undefined".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyConfig {
    pub prefix: String,
    pub suffix: String,
    pub transform: Option<Spanned<TransformSpec>>,
}

impl KeyConfig {
    fn into_conv(self, key_space: &str, fallback: KeyTransform) -> Result<KeyConv, ArgsError> {
        let transform = match &self.transform {
            Some(spec) => spec.get_ref().key_transform(key_space)?,
            None => fallback,
        };

        Ok(KeyConv {
            prefix: self.prefix,
            suffix: self.suffix,
            transform,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionConfig {
    pub prefix: String,
    pub name_prefix: String,
    pub name_suffix: String,
    pub transform: Option<Spanned<TransformSpec>>,
}

impl Default for OptionConfig {
    fn default() -> Self {
        let conv = OptionConv::default();
        OptionConfig {
            prefix: conv.prefix,
            name_prefix: conv.name_prefix,
            name_suffix: conv.name_suffix,
            transform: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub name_filter: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub value_type: Option<String>,
    pub metavar: Option<String>,
    pub defaults: HashMap<String, DefaultSpec>,
    pub env_key: KeyConfig,
    pub var_key: KeyConfig,
    pub opt_key: KeyConfig,
    pub option: OptionConfig,
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(source)?;
        config.check_transforms()?;

        Ok(config)
    }

    /// Reject unknown transform names, blaming the value the parser saw.
    fn check_transforms(&self) -> Result<(), ConfigError> {
        let blame = |e: ArgsError, span: Range<usize>| ConfigError {
            message: e.to_string(),
            span: Some(span),
        };
        let keys = [
            ("env_key", &self.env_key.transform),
            ("var_key", &self.var_key.transform),
            ("opt_key", &self.opt_key.transform),
        ];
        for (key_space, spec) in keys {
            if let Some(spec) = spec {
                spec.get_ref()
                    .key_transform(key_space)
                    .map_err(|e| blame(e, spec.span()))?;
            }
        }
        if let Some(spec) = &self.option.transform {
            spec.get_ref()
                .option_transform()
                .map_err(|e| blame(e, spec.span()))?;
        }

        Ok(())
    }

    pub fn into_options(self) -> Result<DeclOptions, ArgsError> {
        let option_transform = match &self.option.transform {
            Some(spec) => spec.get_ref().option_transform()?,
            None => None,
        };
        let nameconv = NameConv {
            env_key: self.env_key.into_conv("env_key", KeyTransform::Identity)?,
            var_key: self.var_key.into_conv("var_key", KeyTransform::Identity)?,
            opt_key: self.opt_key.into_conv("opt_key", KeyTransform::Disabled)?,
            option: OptionConv {
                prefix: self.option.prefix,
                name_prefix: self.option.name_prefix,
                name_suffix: self.option.name_suffix,
                transform: option_transform,
            },
        };
        let mut options = DeclOptions {
            defaults: self
                .defaults
                .into_iter()
                .map(|(k, DefaultSpec(v))| (k, v))
                .collect(),
            nameconv,
            metavar: self.metavar,
            ..Default::default()
        };
        if let Some(names) = self.name_filter {
            options.name_filter = NameFilter::Names(names);
        }
        if let Some(value_type) = self.value_type {
            options.value_type = value_type;
        }
        tracing::debug!(?options, "loaded declaration config");

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        let options = config.into_options().unwrap();
        assert!(options.nameconv.opt_key.transform.is_disabled());
        assert_eq!(options.nameconv.option.prefix, "--");
        assert_eq!(options.value_type, "string");
        assert!(options.name_filter.accepts("anything"));
    }

    #[test]
    fn test_full_config() {
        let source = r#"
name_filter = ["prefix", "bindir"]
type = "path"
metavar = "PATH"

[defaults]
prefix = "/usr"

[env_key]
prefix = "GNU_"
transform = "upper"

[var_key]
transform = false

[opt_key]
suffix = "_opt"
transform = true

[option]
prefix = "-"
name_prefix = "with-"
"#;
        let options = Config::from_toml(source).unwrap().into_options().unwrap();
        let conv = &options.nameconv;
        assert_eq!(conv.env_key("bindir").as_deref(), Some("GNU_BINDIR"));
        assert_eq!(conv.var_key("bindir"), None);
        assert_eq!(conv.opt_key("bindir").as_deref(), Some("bindir_opt"));
        assert_eq!(conv.option("exec_prefix").as_deref(), Some("-with-exec-prefix"));
        assert_eq!(options.defaults.get("prefix"), Some(&DefaultValue::value("/usr")));
        assert_eq!(options.metavar.as_deref(), Some("PATH"));
        assert_eq!(options.value_type, "path");
        assert!(options.name_filter.accepts("bindir"));
        assert!(!options.name_filter.accepts("libdir"));
    }

    fn blamed<'a>(source: &'a str, err: &ConfigError) -> &'a str {
        let span = err.span.clone().unwrap();
        source[span].trim_matches(|c| c == '"' || c == '\'')
    }

    #[test]
    fn test_bad_transform_has_span() {
        let source = "[var_key]\ntransform = \"camel\"\n";
        let err = Config::from_toml(source).unwrap_err();
        assert_eq!(err.message, "unsupported var_key transform 'camel'");
        assert_eq!(blamed(source, &err), "camel");
    }

    #[test]
    fn test_span_skips_same_text_in_other_keys() {
        let source = "[env_key]\nprefix = \"camel\"\ntransform = \"camel\"\n";
        let err = Config::from_toml(source).unwrap_err();
        let span = err.span.clone().unwrap();
        assert!(span.start > source.find("transform").unwrap());
        assert_eq!(blamed(source, &err), "camel");
    }

    #[test]
    fn test_span_in_inline_table() {
        let source = "env_key = { transform = 'camel' }\n";
        let err = Config::from_toml(source).unwrap_err();
        assert_eq!(err.message, "unsupported env_key transform 'camel'");
        assert_eq!(blamed(source, &err), "camel");
    }

    #[test]
    fn test_span_after_multibyte_text() {
        let source = "metavar = \"répertoire\"\n[opt_key]\ntransform = \"ü\"\n";
        let err = Config::from_toml(source).unwrap_err();
        assert_eq!(blamed(source, &err), "ü");
        let out = err.pretty_print(source, "decls.toml");
        assert!(out.contains("unsupported opt_key transform"));
    }

    #[test]
    fn test_bad_transform_at_end_of_file() {
        let source = "[env_key]\ntransform = \"ü\"";
        let err = Config::from_toml(source).unwrap_err();
        assert!(err
            .pretty_print(source, "decls.toml")
            .contains("unsupported env_key transform 'ü'"));
    }

    #[test]
    fn test_undefined_default() {
        let source = "[defaults]\nINSTALL_DATA = false\nAWK = \"gawk\"\n";
        let options = Config::from_toml(source).unwrap().into_options().unwrap();
        assert_eq!(options.defaults.get("INSTALL_DATA"), Some(&DefaultValue::Undefined));
        assert_eq!(options.defaults.get("AWK"), Some(&DefaultValue::value("gawk")));
    }

    #[test]
    fn test_true_is_not_a_default() {
        let err = Config::from_toml("[defaults]\nprefix = true\n").unwrap_err();
        assert!(err.message.contains("false to leave it undefined"));
    }

    #[test]
    fn test_bad_option_transform() {
        let err = Config::from_toml("[option]\ntransform = true\n").unwrap_err();
        assert_eq!(err.message, "unsupported option transform 'true'");
        assert!(err.span.is_some());
    }

    #[test]
    fn test_unknown_field() {
        let err = Config::from_toml("[env_key]\npostfix = \"x\"\n").unwrap_err();
        assert!(err.message.contains("postfix"));
        assert!(err.span.is_some());
    }
}
