//! alt_programs.rs - Paths to GNU alternative programs.
//!
//! These are the autoconf output variables naming [alternative
//! programs](https://www.gnu.org/software/autoconf/manual/autoconf.html#Alternative-Programs)
//! such as `AWK` or `INSTALL`. Most of them have no default.

use crate::decl::{self, DeclOptions, Declarations};
use crate::filter::NameFilter;
use crate::triple::{DefaultValue, Triple, TripleTable};

use std::sync::LazyLock;

const TRIPLES: &[(&str, &str, Option<&str>)] = &[
    ("AWK", "The awk program", None),
    ("EGREP", "The egrep program", None),
    ("FGREP", "The fgrep program", None),
    ("GREP", "The grep program", None),
    ("INSTALL", "The program used to install files", None),
    ("INSTALL_DATA", "The program used to install data", Some("${INSTALL}")),
    ("INSTALL_PROGRAM", "The program used to install programs", Some("${INSTALL}")),
    ("INSTALL_SCRIPT", "The program used to install scripts", Some("${INSTALL}")),
    ("LEX", "The lex program", None),
    ("LEX_OUTPUT_ROOT", "The base of the file name that the LEX generates", None),
    ("LEXLIB", "Library that should be linked to LEX-generated programs", None),
    ("LN_S", "Either 'ln -s', 'cp -pR' or just 'ln'", None),
    ("MKDIR_P", "Either 'mkdir -p' or 'install-sh'", None),
    ("RANLIB", "The ranlib program", None),
    ("SED", "The sed program", None),
    ("YACC", "The yacc program", None),
];

pub fn build_table() -> TripleTable {
    let triples = TRIPLES
        .iter()
        .map(|(name, desc, default)| {
            let default = match default {
                Some(d) => DefaultValue::value(*d),
                None => DefaultValue::Undefined,
            };
            Triple::new(*name, *desc, default)
        })
        .collect();

    #[allow(clippy::expect_used)]
    TripleTable::new(triples).expect("alternative program names are unique")
}

static TABLE: LazyLock<TripleTable> = LazyLock::new(build_table);

pub fn table() -> &'static TripleTable {
    &TABLE
}

/// Names of the alternative program arguments accepted by `name_filter`.
pub fn names(name_filter: &NameFilter) -> Vec<String> {
    table().names(name_filter)
}

/// Declarations of the alternative program arguments.
///
/// Options are left out unless `options` enables the opt key space.
pub fn declarations(options: &DeclOptions) -> Declarations {
    decl::build(table(), options)
}
