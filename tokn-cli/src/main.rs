//! Command-line interface for tokn
//! This binary builds stylesheet bundles from a design-token document and inspects the results.
//!
//! Usage:
//!   tokn build [--config `<file>`] [--tokens `<file>`] [--out `<dir>`]   - Build and write every bundle
//!   tokn inspect `<tokens.json>` [--limit `<n>`]                          - Show flattened tokens
//!   tokn query `<file.scss>` [--section | --variable | --prefix `<name>`] - Read emitted tokens back
//!   tokn list-formats                                                   - List available formats
//!
//! Configuration comes from the built-in defaults, then `tokn.toml` in the working directory if
//! present, then `--config`. Logs go to stderr; stdout carries only results.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::fs;
use std::path::{Path, PathBuf};
use tokn_babel::{build_source, publish, BuildOptions, FormatRegistry, TokenCatalog};
use tokn_config::{Loader, ToknConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

const PROJECT_CONFIG: &str = "tokn.toml";

fn main() {
    let matches = Command::new("tokn")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build SCSS and CSS token bundles from a design-token document")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over tokn.toml and the defaults")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug details to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("build")
                .about("Build every bundle and replace the output tree")
                .arg(
                    Arg::new("tokens")
                        .long("tokens")
                        .short('t')
                        .help("Token document (default: paths.tokens_file)"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .help("Build root (default: paths.build_root)"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print flattened token entries as JSON")
                .arg(
                    Arg::new("path")
                        .help("Path to the token document")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .short('n')
                        .help("Number of entries to print")
                        .value_parser(value_parser!(usize))
                        .default_value("5"),
                ),
        )
        .subcommand(
            Command::new("query")
                .about("Read an emitted SCSS file back into sections and tokens")
                .arg(
                    Arg::new("path")
                        .help("Path to the SCSS file, usually _all.scss")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("section")
                        .long("section")
                        .help("Print the groups of one section")
                        .conflicts_with_all(["variable", "prefix"]),
                )
                .arg(
                    Arg::new("variable")
                        .long("variable")
                        .help("Print one token, with or without the leading $")
                        .conflicts_with("prefix"),
                )
                .arg(
                    Arg::new("prefix")
                        .long("prefix")
                        .help("Print every token whose variable starts with this prefix"),
                ),
        )
        .subcommand(Command::new("list-formats").about("List the available output formats"))
        .get_matches();

    let (name, sub) = matches.subcommand().expect("a subcommand is required");
    // Global flags are propagated into the subcommand's matches.
    init_logging(sub.get_flag("verbose"));

    match name {
        "build" => handle_build_command(sub),
        "inspect" => {
            let path = sub.get_one::<String>("path").expect("path is required");
            let limit = *sub.get_one::<usize>("limit").expect("limit has a default");
            handle_inspect_command(path, limit);
        }
        "query" => handle_query_command(sub),
        "list-formats" => handle_list_formats_command(),
        _ => unreachable!("unknown subcommand {}", name),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,tokn=debug,tokn_babel=debug,tokn_core=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,tokn=info,tokn_babel=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Defaults, then the project file, then `--config`, then command-line overrides.
fn load_config(sub: &ArgMatches, overrides: &[(&str, Option<&String>)]) -> ToknConfig {
    let mut loader = Loader::new().with_optional_file(PROJECT_CONFIG);
    if let Some(path) = sub.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    for (key, value) in overrides {
        if let Some(value) = value {
            loader = loader
                .set_override(key, value.as_str())
                .unwrap_or_else(|e| fail("Invalid configuration override", e));
        }
    }
    loader
        .build()
        .unwrap_or_else(|e| fail("Configuration error", e))
}

fn read_file(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("Cannot read {}", path.display()), e))
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", context, err);
    std::process::exit(1);
}

/// Handle the build command
fn handle_build_command(sub: &ArgMatches) {
    let config = load_config(
        sub,
        &[
            ("paths.tokens_file", sub.get_one::<String>("tokens")),
            ("paths.build_root", sub.get_one::<String>("out")),
        ],
    );
    let tokens_file = &config.paths.tokens_file;
    info!(path = %tokens_file.display(), "reading token document");
    let source = read_file(tokens_file);

    let output = build_source(&source, &config.build_settings(), &BuildOptions::default())
        .unwrap_or_else(|e| fail("Error building tokens", e));
    let layout = config.output_layout();
    let written = publish(&output, &layout).unwrap_or_else(|e| fail("Error writing tokens", e));

    let total: usize = output.bundles.iter().map(|b| b.tokens).sum();
    println!(
        "Built {} bundles ({} tokens) from {}",
        output.bundles.len(),
        total,
        tokens_file.display()
    );
    for bundle in &output.bundles {
        println!("  {} ({} tokens)", bundle.title, bundle.tokens);
    }
    println!("\nOutput locations:");
    println!("  SCSS (with aliases): {}", layout.alias_path().display());
    println!("  CSS (flat values): {}", layout.flat_path().display());
    for path in written {
        println!("  {}", path.display());
    }
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, limit: usize) {
    let source = read_file(Path::new(path));
    let tokens = tokn_core::parse_document(&source)
        .unwrap_or_else(|e| fail("Error reading token document", e));
    let shown = &tokens[..limit.min(tokens.len())];
    eprintln!("{} of {} tokens", shown.len(), tokens.len());
    print_json(&shown);
}

/// Handle the query command
fn handle_query_command(sub: &ArgMatches) {
    let config = load_config(sub, &[]);
    let path = sub.get_one::<String>("path").expect("path is required");
    let catalog = TokenCatalog::parse(&read_file(Path::new(path)), &config.banner);

    if let Some(section) = sub.get_one::<String>("section") {
        print_json(&catalog.section(section));
    } else if let Some(variable) = sub.get_one::<String>("variable") {
        match catalog.find_token(variable) {
            Some(entry) => print_json(entry),
            None => fail("Token not found", variable),
        }
    } else if let Some(prefix) = sub.get_one::<String>("prefix") {
        print_json(&catalog.find_tokens_by_prefix(prefix));
    } else {
        print_json(&catalog.sections().collect::<Vec<_>>());
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");

    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let mut abilities = Vec::new();
        if format.supports_parsing() {
            abilities.push("parse");
        }
        if format.supports_serialization() {
            abilities.push("serialize");
        }
        println!("  {} (.{}) [{}]", name, format.file_extension(), abilities.join(", "));
        println!("    {}", format.description());
        println!();
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| fail("Error formatting output", e));
    println!("{}", json);
}
