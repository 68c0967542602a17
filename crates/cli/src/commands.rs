//! Clap command tree.

use clap::{Arg, ArgAction, Command};

/// Build the top-level `chronolog` command.
pub fn build_cli() -> Command {
    Command::new("chronolog")
        .about("Inspect and maintain a Chronolog record store")
        .arg(
            Arg::new("db")
                .long("db")
                .value_name("FILE")
                .help("Path to the store's JSON file")
                .required(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log store activity to stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("tail")
                .about("Print the newest records, oldest first")
                .arg(
                    Arg::new("n")
                        .value_name("N")
                        .help("Number of records")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                ),
        )
        .subcommand(
            Command::new("range")
                .about("Print records stamped within [START, END]")
                .arg(
                    Arg::new("start")
                        .value_name("START")
                        .help("RFC 3339 instant, inclusive")
                        .required(true),
                )
                .arg(
                    Arg::new("end")
                        .value_name("END")
                        .help("RFC 3339 instant, inclusive")
                        .required(true),
                ),
        )
        .subcommand(Command::new("count").about("Print the number of records"))
        .subcommand(
            Command::new("append")
                .about("Add a JSON payload stamped now")
                .arg(
                    Arg::new("json")
                        .value_name("JSON")
                        .help("Payload document")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("prune")
                .about("Delete records stamped before CUTOFF")
                .arg(
                    Arg::new("cutoff")
                        .value_name("CUTOFF")
                        .help("RFC 3339 instant; a record stamped exactly CUTOFF is kept")
                        .required(true),
                ),
        )
        .subcommand(Command::new("clear").about("Delete every record"))
}
