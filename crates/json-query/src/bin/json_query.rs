//! `json-query` — read or update a value in a JSON file by key path.
//!
//! Usage:
//!   json-query <file> <key> [--get | --set <value>]
//!
//! Examples:
//!   json-query config.json backends.opencode.enabled
//!   json-query config.json backends[0].name --set '"mock"'
//!   json-query config.json settings.timeout --set 300
//!
//! Logging is configured through `RUST_LOG` (default `warn`).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use argh::FromArgs;
use json_query::json_cli::{self, Action, QueryOptions};

#[derive(FromArgs)]
/// Read or update a value in a JSON file using a dot/bracket key path.
struct Args {
    #[argh(positional)]
    /// path to the JSON file.
    file: PathBuf,

    #[argh(positional)]
    /// key path such as `backends[0].config.timeout`.
    key: String,

    #[argh(switch)]
    /// print the value at the key path (the default action).
    get: bool,

    #[argh(option)]
    /// set the value at the key path; `true`/`false`, integers and decimals are typed, surrounding double quotes are stripped.
    set: Option<String>,

    #[argh(switch)]
    /// keep the backup file after a successful update.
    keep_backup: bool,

    #[argh(option, default = "String::from(\".bak\")")]
    /// suffix of the backup file written before an update (default `.bak`).
    backup_suffix: String,
}

fn run(args: Args) -> Result<String> {
    let action = match (args.get, args.set) {
        (true, Some(_)) => bail!("--get and --set cannot be combined"),
        (_, Some(raw)) => Action::Set(raw),
        (_, None) => Action::Get,
    };
    let options = QueryOptions {
        keep_backup: args.keep_backup,
        backup_suffix: args.backup_suffix,
    };
    Ok(json_cli::run(&args.file, &args.key, &action, &options)?)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Args = argh::from_env();
    match run(args) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
