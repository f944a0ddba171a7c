//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("jsondocs")
        .about("Read and mutate a sandboxed tree of JSON documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("root")
                .long("root")
                .help("Sandbox root directory (default: .)")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .conflicts_with("raw")
                .global(true),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .help("Raw output mode (compact JSON, no prefixes)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("read-only")
                .long("read-only")
                .help("Open the store in read-only mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .help("Write documents without indentation")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("get")
                .about("Print a whole document")
                .arg(Arg::new("path").required(true)),
        )
        .subcommand(
            Command::new("nested")
                .about("Print a nested value, e.g. `nested cfg.json db.port`")
                .arg(Arg::new("path").required(true))
                .arg(
                    Arg::new("keys")
                        .required(true)
                        .help("Dot-separated key path; \"\" for the whole document"),
                ),
        )
        .subcommand(
            Command::new("init")
                .about("Create or overwrite a document")
                .arg(Arg::new("path").required(true))
                .arg(
                    Arg::new("value")
                        .help("Initial value (default: {})")
                        .default_value("{}"),
                ),
        )
        .subcommand(
            Command::new("merge")
                .about("Shallow-merge a JSON object into a document")
                .arg(Arg::new("path").required(true))
                .arg(Arg::new("patch").required(true)),
        )
        .subcommand(
            Command::new("edit")
                .about("Overwrite only fields that already exist in a document")
                .arg(Arg::new("path").required(true))
                .arg(Arg::new("patch").required(true)),
        )
        .subcommand(
            Command::new("incr")
                .about("Add one to a numeric field")
                .arg(Arg::new("path").required(true))
                .arg(Arg::new("field").required(true)),
        )
        .subcommand(
            Command::new("copy")
                .about("Copy a file or directory")
                .arg(Arg::new("source").required(true))
                .arg(Arg::new("target").required(true))
                .arg(
                    Arg::new("recursive")
                        .short('r')
                        .long("recursive")
                        .help("Copy directories recursively")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a file, or an empty directory with --dir")
                .arg(Arg::new("path").required(true))
                .arg(
                    Arg::new("dir")
                        .short('d')
                        .long("dir")
                        .help("The path is a directory")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("mkdir")
                .about("Create a directory and its ancestors")
                .arg(Arg::new("path").required(true)),
        )
        .subcommand(
            Command::new("ls")
                .about("List a directory")
                .arg(Arg::new("path").default_value("")),
        )
}
