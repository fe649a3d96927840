//! install_dirs.rs - GNU installation directory variables.
//!
//! `prefix`, `exec_prefix`, `bindir` and friends as described by the
//! [GNU Coding Standards](https://www.gnu.org/prep/standards/html_node/Directory-Variables.html).
//! Defaults refer to each other through `${...}` placeholders, plus
//! `${package}` and `${install_package}` which the project has to provide.

use crate::decl::{self, DeclOptions, Declarations};
use crate::filter::NameFilter;
use crate::triple::{DefaultValue, Triple, TripleTable};

use std::sync::LazyLock;

const BASE_TRIPLES: &[(&str, &str, &str)] = &[
    ("prefix", "Installation prefix", "/usr/local"),
    (
        "exec_prefix",
        "Installation prefix for executable files",
        "${prefix}",
    ),
    (
        "bindir",
        "The directory for installing executable programs that users can run.",
        "${exec_prefix}/bin",
    ),
    (
        "sbindir",
        "The directory for installing executable programs that can be run from the \
         shell, but are only generally useful to system administrators.",
        "${exec_prefix}/sbin",
    ),
    (
        "libexecdir",
        "The directory for installing executable programs to be run by other \
         programs rather than by users.",
        "${exec_prefix}/libexec",
    ),
    (
        "datarootdir",
        "The root of the directory tree for read-only architecture-independent \
         data files.",
        "${prefix}/share",
    ),
    (
        "datadir",
        "The directory for installing idiosyncratic read-only \
         architecture-independent data files for this program.",
        "${datarootdir}",
    ),
    (
        "sysconfdir",
        "The directory for installing read-only data files that pertain to a single \
         machine - that is to say, files for configuring a host.",
        "${prefix}/etc",
    ),
    (
        "sharedstatedir",
        "The directory for installing architecture-independent data files which \
         the programs modify while they run.",
        "${prefix}/com",
    ),
    (
        "localstatedir",
        "The directory for installing data files which the programs modify while \
         they run, and that pertain to one specific machine.",
        "${prefix}/var",
    ),
    (
        "includedir",
        "The directory for installing header files to be included by user programs \
         with the C \"#include\" preprocessor directive.",
        "${prefix}/include",
    ),
    (
        "oldincludedir",
        "The directory for installing \"#include\" header files for use with compilers \
         other than GCC.",
        "/usr/include",
    ),
    (
        "docdir",
        "The directory for installing documentation files (other than Info) for this \
         package.",
        "${datarootdir}/doc/${install_package}",
    ),
    (
        "infodir",
        "The directory for installing the Info files for this package.",
        "${datarootdir}/info",
    ),
    (
        "htmldir",
        "Directory for installing documentation files in the html format.",
        "${docdir}",
    ),
    (
        "dvidir",
        "Directory for installing documentation files in the dvi format.",
        "${docdir}",
    ),
    (
        "pdfdir",
        "Directory for installing documentation files in the pdf format.",
        "${docdir}",
    ),
    (
        "psdir",
        "Directory for installing documentation files in the ps format.",
        "${docdir}",
    ),
    (
        "libdir",
        "The directory for object files and libraries of object code.",
        "${exec_prefix}/lib",
    ),
    (
        "lispdir",
        "The directory for installing any Emacs Lisp files in this package.",
        "${datarootdir}/emacs/site-lisp",
    ),
    (
        "localedir",
        "The directory for installing locale-specific message catalogs for this \
         package.",
        "${datarootdir}/locale",
    ),
    (
        "mandir",
        "The top-level directory for installing the man pages (if any) for this \
         package.",
        "${datarootdir}/man",
    ),
    (
        "pkgdatadir",
        "The directory for installing idiosyncratic read-only \
         architecture-independent data files for this program.",
        "${datadir}/${package}",
    ),
    (
        "pkgincludedir",
        "The directory for installing header files to be included by user programs \
         with the C \"#include\" preprocessor directive.",
        "${includedir}/${package}",
    ),
    (
        "pkglibdir",
        "The directory for object files and libraries of object code.",
        "${libdir}/${package}",
    ),
    (
        "pkglibexecdir",
        "The directory for installing executable programs to be run by other \
         programs rather than by users.",
        "${libexecdir}/${package}",
    ),
];

/// Man page sections getting their own `man<sec>dir` and `man<sec>ext`.
pub const MAN_SECTIONS: &[&str] = &["1", "2", "3", "4", "5", "6", "7", "8", "9", "n", "l"];

/// Directory and extension triples for each of `sections`, in order.
pub fn man_triples(sections: &[&str]) -> Vec<Triple> {
    let mut triples = Vec::with_capacity(sections.len() * 2);
    for sec in sections {
        triples.push(Triple::new(
            format!("man{}dir", sec),
            format!("The directory for installing section {} man pages.", sec),
            DefaultValue::Value(format!("${{mandir}}/man{}", sec)),
        ));
        triples.push(Triple::new(
            format!("man{}ext", sec),
            format!(
                "The file name extension for installed section {} man pages.",
                sec
            ),
            DefaultValue::Value(format!(".{}", sec)),
        ));
    }

    triples
}

/// Build the installation directory table from scratch.
///
/// Most callers want the shared [`table`] instead.
pub fn build_table() -> TripleTable {
    let mut triples: Vec<Triple> = BASE_TRIPLES
        .iter()
        .map(|(name, desc, default)| Triple::new(*name, *desc, DefaultValue::value(*default)))
        .collect();
    triples.extend(man_triples(MAN_SECTIONS));

    // Names above are fixed and distinct
    #[allow(clippy::expect_used)]
    TripleTable::new(triples).expect("installation directory names are unique")
}

static TABLE: LazyLock<TripleTable> = LazyLock::new(build_table);

pub fn table() -> &'static TripleTable {
    &TABLE
}

/// Names of the installation directory arguments accepted by `name_filter`.
pub fn names(name_filter: &NameFilter) -> Vec<String> {
    table().names(name_filter)
}

/// Declarations of the installation directory arguments.
///
/// Command-line options are only declared if `options` enables the opt key
/// space; [`DeclOptions::default`] leaves it disabled.
pub fn declarations(options: &DeclOptions) -> Declarations {
    decl::build(table(), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_man_triples() {
        let triples = man_triples(MAN_SECTIONS);
        assert_eq!(triples.len(), 22);
        assert_eq!(triples[0].name, "man1dir");
        assert_eq!(triples[0].default, "${mandir}/man1".into());
        assert_eq!(
            triples[0].description,
            "The directory for installing section 1 man pages."
        );
        assert_eq!(triples[21].name, "manlext");
        assert_eq!(triples[21].default, ".l".into());
        for sec in MAN_SECTIONS {
            let ext = triples
                .iter()
                .find(|t| t.name == format!("man{}ext", sec))
                .unwrap();
            assert_eq!(ext.default, DefaultValue::Value(format!(".{}", sec)));
        }
    }

    #[test]
    fn test_man_entries_follow_base_table() {
        let t = table();
        assert_eq!(t.len(), BASE_TRIPLES.len() + 22);
        let names = t.names(&NameFilter::All);
        assert_eq!(names[BASE_TRIPLES.len() - 1], "pkglibexecdir");
        assert_eq!(names[BASE_TRIPLES.len()], "man1dir");
        assert_eq!(names[BASE_TRIPLES.len() + 1], "man1ext");
    }

    #[test]
    fn test_factory_is_deterministic() {
        assert_eq!(&build_table(), table());
    }
}
