//! ArgMatches → Command conversion.

use clap::ArgMatches;
use jsondocs_executor::{Command, KeyPath};

use crate::value::{parse_patch, parse_value};

fn arg(matches: &ArgMatches, name: &str) -> String {
    matches.get_one::<String>(name).cloned().unwrap_or_default()
}

/// Translate the selected subcommand into a [`Command`].
pub fn matches_to_command(matches: &ArgMatches) -> Result<Command, String> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| "no subcommand given".to_string())?;

    let cmd = match name {
        "get" => Command::GetDocument {
            path: arg(sub, "path"),
        },
        "nested" => {
            let keys: KeyPath = arg(sub, "keys")
                .parse()
                .map_err(|e| format!("invalid key path: {}", e))?;
            Command::GetNestedValue {
                path: arg(sub, "path"),
                keys: keys.segments().to_vec(),
            }
        }
        "init" => Command::InitDocument {
            path: arg(sub, "path"),
            value: parse_value(&arg(sub, "value")),
        },
        "merge" => Command::MergeUpdate {
            path: arg(sub, "path"),
            patch: parse_patch(&arg(sub, "patch"))?,
        },
        "edit" => Command::RestrictedEdit {
            path: arg(sub, "path"),
            patch: parse_patch(&arg(sub, "patch"))?,
        },
        "incr" => Command::Increment {
            path: arg(sub, "path"),
            field: arg(sub, "field"),
        },
        "copy" => Command::CopyItem {
            source: arg(sub, "source"),
            target: arg(sub, "target"),
            recursive: sub.get_flag("recursive"),
        },
        "rm" => Command::DeleteItem {
            path: arg(sub, "path"),
            is_directory: sub.get_flag("dir"),
        },
        "mkdir" => Command::CreateFolder {
            path: arg(sub, "path"),
        },
        "ls" => Command::ListDirectory {
            path: arg(sub, "path"),
        },
        other => return Err(format!("unknown command: {}", other)),
    };
    Ok(cmd)
}
