//! Predefined GNU build arguments.
//!
//! Tables of well known variables (installation directories, alternative
//! programs) and the conversion of those tables into argument declarations a
//! build tool can register as substitution variables, command-line variables
//! and command-line options.
//!
//! ```
//! use gnu_args::{install_dirs, DeclOptions, NameFilter};
//!
//! let options = DeclOptions::default().with_name_filter(NameFilter::names(["prefix"]));
//! let decls = install_dirs::declarations(&options);
//! assert_eq!(decls.get("prefix").unwrap().default.as_str(), Some("/usr/local"));
//! ```

pub mod alt_programs;
pub mod config;
mod decl;
mod error;
mod filter;
pub mod install_dirs;
mod nameconv;
mod triple;

pub use self::config::Config;
pub use self::decl::{build, guess_metavar, DeclOptions, Declaration, Declarations};
pub use self::error::{ArgsError, ConfigError};
pub use self::filter::{filter_names, NameFilter};
pub use self::nameconv::{flagify, KeyConv, KeyTransform, NameConv, NameFn, OptionConv};
pub use self::triple::{DefaultValue, Triple, TripleTable};
