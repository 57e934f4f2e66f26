//! Luban table loader CLI

use clap::{Arg, ArgAction, Command};
use luban_loader::{Config, Directory, Tables, DEFAULT_EXTENSION};
use std::path::PathBuf;
use tracing::{error, info};

/// Returns the version of the crate.
pub const fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Flag for verbose output
const VERBOSE_FLAG: &str = "verbose";

/// Entrypoint for the Luban table loader CLI
fn main() -> std::process::ExitCode {
    // Define application
    let matches = Command::new("luban-loader")
        .version(crate_version())
        .about("Load exported Luban tables and report their sizes.")
        .arg(
            Arg::new(VERBOSE_FLAG)
                .short('v')
                .long(VERBOSE_FLAG)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .required(true)
                .help("Directory holding the exported table files")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("extension")
                .long("extension")
                .default_value(DEFAULT_EXTENSION)
                .help("Extension of each table file, without the leading dot")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(
            Arg::new("table")
                .long("table")
                .required(true)
                .action(ArgAction::Append)
                .help("Name of a table to load (may be repeated)")
                .value_parser(clap::value_parser!(String)),
        )
        .get_matches();

    // Create logger
    let level = if matches.get_flag(VERBOSE_FLAG) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    // Load tables
    let cfg = Config {
        root: matches.get_one::<PathBuf>("dir").unwrap().clone(),
        extension: matches.get_one::<String>("extension").unwrap().clone(),
    };
    let names: Vec<&str> = matches
        .get_many::<String>("table")
        .unwrap()
        .map(String::as_str)
        .collect();
    let source = Directory::new(cfg);
    match Tables::load(&source, names) {
        Ok(tables) => {
            let total: usize = tables.iter().map(|(_, buf)| buf.size()).sum();
            info!(tables = tables.len(), bytes = total, "loaded all tables");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = ?e, "failed to load tables");
            std::process::ExitCode::FAILURE
        }
    }
}
