//! Command-line interface for cs2mako
//! This binary converts ClearSilver templates into Mako templates.
//!
//! Usage:
//!   cs2mako [`<path>`]                      - Convert a file (or stdin) to stdout
//!   cs2mako `<path>` --output `<file>`      - Convert into the given file
//!   cs2mako `<path>` --write                - Convert into `<path>` with the configured extension
//!   cs2mako [`<path>`] --tokens             - Print the scanned tokens as JSON
//!
//! Configuration is read from the built-in defaults, then `cs2mako.toml` in the working
//! directory, then the file given with `--config`, then `--setter`/`--include-root`.

mod transforms;

use clap::{Arg, ArgAction, ArgMatches, Command};
use cs2mako_config::{Cs2MakoConfig, Loader};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use transforms::{execute_transform, Transform};

fn build_cli() -> Command {
    Command::new("cs2mako")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert ClearSilver templates to Mako")
        .arg(
            Arg::new("path")
                .help("Path to the ClearSilver template (reads stdin when absent or '-')")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the result to this file instead of stdout")
                .conflicts_with("write"),
        )
        .arg(
            Arg::new("write")
                .long("write")
                .short('w')
                .help("Write the result next to the input, using the configured extension")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print the scanned token stream as JSON instead of converting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("setter")
                .long("setter")
                .help("Function used for `set` assignments (default: hdf.set_value)"),
        )
        .arg(
            Arg::new("include-root")
                .long("include-root")
                .help("Prefix for included template paths (default: /)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (repeatable)")
                .action(ArgAction::Count),
        )
}

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    if let Err(message) = run(&matches) {
        eprintln!("{}", message);
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(matches: &ArgMatches) -> Result<(), String> {
    let config = load_config(matches)?;
    let path = matches
        .get_one::<String>("path")
        .filter(|path| path.as_str() != "-")
        .map(PathBuf::from);

    let source = read_source(path.as_deref())?;
    let transform = if matches.get_flag("tokens") {
        Transform::TokenJson
    } else {
        Transform::Mako
    };
    let output = execute_transform(&source, transform, config.convert_options())?;

    let destination = if matches.get_flag("write") {
        let input = path.ok_or_else(|| "--write needs an input path".to_string())?;
        Some(input.with_extension(&config.output.extension))
    } else {
        matches.get_one::<String>("output").map(PathBuf::from)
    };

    match destination {
        Some(destination) => {
            fs::write(&destination, output)
                .map_err(|e| format!("Cannot write {}: {}", destination.display(), e))?;
            log::info!("wrote {}", destination.display());
        }
        None => print!("{}", output),
    }
    Ok(())
}

fn load_config(matches: &ArgMatches) -> Result<Cs2MakoConfig, String> {
    let mut loader = Loader::new().with_project_file(".");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    for (flag, key) in [("setter", "setter"), ("include-root", "include_root")] {
        if let Some(value) = matches.get_one::<String>(flag) {
            loader = loader
                .with_convert_override(key, value)
                .map_err(|e| format!("Configuration error: {}", e))?;
        }
    }
    loader
        .build()
        .map_err(|e| format!("Configuration error: {}", e))
}

fn read_source(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e)),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| format!("Cannot read stdin: {}", e))?;
            Ok(source)
        }
    }
}
