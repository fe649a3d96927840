use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use gnu_args::{alt_programs, install_dirs, Config, DeclOptions, Declarations};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Table {
    InstallDirs,
    AltPrograms,
    All,
}

/// Dump predefined GNU arguments as JSON
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Which table to dump
    #[arg(long, value_enum, default_value_t = Table::All)]
    table: Table,
    /// TOML file with declaration options
    #[arg(long, env = "GNU_ARGS_CONFIG")]
    config: Option<PathBuf>,
    /// Only list argument names
    #[arg(long)]
    names: bool,
    /// Write to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Dump {
    Names(Vec<String>),
    Declarations(Declarations),
}

fn load_options(path: &Path) -> Result<DeclOptions> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = match Config::from_toml(&source) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e.pretty_print(&source, &path.to_string_lossy()));
            return Err(anyhow!("Failed to parse {}: {}", path.display(), e));
        }
    };

    Ok(config.into_options()?)
}

fn dump(table: Table, names: bool, options: &DeclOptions) -> Result<String> {
    let mut dump = BTreeMap::new();
    if matches!(table, Table::InstallDirs | Table::All) {
        let d = if names {
            Dump::Names(install_dirs::names(&options.name_filter))
        } else {
            Dump::Declarations(install_dirs::declarations(options))
        };
        dump.insert("install_dirs", d);
    }
    if matches!(table, Table::AltPrograms | Table::All) {
        let d = if names {
            Dump::Names(alt_programs::names(&options.name_filter))
        } else {
            Dump::Declarations(alt_programs::declarations(options))
        };
        dump.insert("alt_programs", d);
    }

    Ok(serde_json::to_string_pretty(&dump)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = match &args.config {
        Some(path) => load_options(path)?,
        None => DeclOptions::default(),
    };
    tracing::info!(table = ?args.table, names = args.names, "dumping arguments");
    let dump = dump(args.table, args.names, &options)?;
    match &args.output {
        Some(path) => {
            let mut f = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            f.write_all(dump.as_bytes())?;
        }
        None => println!("{}", dump),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gnu_args::NameFilter;
    use serde_json::Value;

    #[test]
    fn test_dump_names() -> Result<()> {
        let options =
            DeclOptions::default().with_name_filter(NameFilter::names(["AWK", "prefix"]));
        let out: Value = serde_json::from_str(&dump(Table::All, true, &options)?)?;
        assert_eq!(
            out,
            serde_json::json!({
                "alt_programs": ["AWK"],
                "install_dirs": ["prefix"],
            })
        );

        Ok(())
    }

    #[test]
    fn test_dump_single_table() -> Result<()> {
        let out = dump(Table::InstallDirs, false, &DeclOptions::default())?;
        let out: Value = serde_json::from_str(&out)?;
        assert!(out.get("alt_programs").is_none());
        assert_eq!(out["install_dirs"]["bindir"]["default"], "${exec_prefix}/bin");
        assert_eq!(out["install_dirs"]["bindir"]["metavar"], "DIR");
        assert!(out["install_dirs"]["bindir"].get("option").is_none());

        Ok(())
    }

    #[test]
    fn test_args() {
        let args = Args::parse_from(["gnu-args-dump", "--table", "alt-programs", "--names"]);
        assert_eq!(args.table, Table::AltPrograms);
        assert!(args.names);
        assert!(args.output.is_none());
    }
}
