//! Command-line interface for pitonisa
//! This binary parses Delphi units and prints their tokens or syntax trees.
//!
//! Usage:
//!   pitonisa execute `<path>` [--format `<format>`] [--query `<path>`] [--config `<file>`]
//!   pitonisa list-formats
//!
//! Set `PITONISA_LOG` (e.g. `PITONISA_LOG=debug`) to see library tracing on stderr.

use clap::{Arg, ArgMatches, Command};
use config::ConfigError;
use tracing_subscriber::EnvFilter;

use pitonisa::config::{Loader, PitonisaConfig, LOCAL_CONFIG_FILE};
use pitonisa::delphi::processor::{
    available_formats, process_file, ProcessingOptions, ProcessingSpec,
};

fn main() {
    init_tracing();

    let matches = Command::new("pitonisa")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting Delphi units")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("execute")
                .about("Parse a unit and print it in the requested format")
                .arg(
                    Arg::new("path")
                        .help("Path to the unit source")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'ast-tag', 'ast-treeviz'); defaults to inspect.format"),
                )
                .arg(
                    Arg::new("query")
                        .long("query")
                        .short('q')
                        .help("Path query selecting the node to print (e.g., '/goal/unit/interfaceSection')"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults"),
                )
                .arg(
                    Arg::new("max-label-chars")
                        .long("max-label-chars")
                        .value_parser(clap::value_parser!(usize))
                        .help("Treeviz label width; defaults to treeviz.max_label_chars"),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("execute", execute_matches)) => handle_execute_command(execute_matches),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("PITONISA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<PitonisaConfig, ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("inspect.format", format.as_str())?;
    }
    if let Some(width) = matches.get_one::<usize>("max-label-chars") {
        loader = loader.set_override("treeviz.max_label_chars", *width as i64)?;
    }
    loader.build()
}

/// Handle the execute command
fn handle_execute_command(matches: &ArgMatches) {
    let config = load_config(matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    tracing::debug!(?config, "configuration loaded");

    let path = matches.get_one::<String>("path").unwrap();

    let spec = ProcessingSpec::from_string(&config.inspect.format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("Run 'pitonisa list-formats' to see the supported formats");
        std::process::exit(1);
    });

    let options = ProcessingOptions {
        query: matches.get_one::<String>("query").cloned(),
        max_label_chars: config.treeviz.max_label_chars,
    };

    let output = process_file(path, &spec, &options).unwrap_or_else(|e| {
        eprintln!("{}: {}", path, e);
        std::process::exit(1);
    });

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
