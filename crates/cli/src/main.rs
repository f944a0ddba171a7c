//! jsondocs CLI: one command per invocation against a sandbox root.
//!
//! ```text
//! jsondocs --root /srv/docs init users/alice.json '{"visits": 0}'
//! jsondocs --root /srv/docs incr users/alice.json visits
//! jsondocs --root /srv/docs --json nested users/alice.json visits
//! ```
//!
//! Exit status is 0 on success, 1 on a failed command, 2 on bad arguments.

mod commands;
mod format;
mod logging;
mod parse;
mod value;

use std::process;

use jsondocs_executor::{AccessMode, JsonDocs, OpenOptions};
use tracing::debug;

use commands::build_cli;
use format::{format_error, format_output, OutputMode};
use parse::matches_to_command;

fn main() {
    logging::set_up_logging();

    let matches = build_cli().get_matches();

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else if matches.get_flag("raw") {
        OutputMode::Raw
    } else {
        OutputMode::Human
    };

    let cmd = match matches_to_command(&matches) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let docs = match open_store(&matches) {
        Ok(docs) => docs,
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(1);
        }
    };
    debug!(target: "jsondocs::cli", root = %docs.root().display(), command = cmd.name(), "dispatch");

    match docs.executor().execute(cmd) {
        Ok(output) => {
            let formatted = format_output(&output, output_mode);
            if !formatted.is_empty() {
                println!("{}", formatted);
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, output_mode));
            process::exit(1);
        }
    }
}

fn open_store(matches: &clap::ArgMatches) -> jsondocs_executor::Result<JsonDocs> {
    let root = matches
        .get_one::<String>("root")
        .map(|s| s.as_str())
        .unwrap_or(".");

    let mut opts = OpenOptions::new();
    if matches.get_flag("read-only") {
        opts = opts.access_mode(AccessMode::ReadOnly);
    }
    if matches.get_flag("compact") {
        opts = opts.pretty(false);
    }

    JsonDocs::open_with(root, opts)
}
