//! Chronolog CLI: inspect and maintain a record store from the shell.
//!
//! `chronolog --db <FILE> <COMMAND>`. Read commands print one JSON payload per
//! line; mutating commands print the number of affected records.

mod commands;
mod parse;

use std::io::{self, BufWriter, Write};
use std::process;

use chronolog::{Database, Value};
use tracing::Level;

use commands::build_cli;
use parse::{matches_to_action, Action};

fn main() {
    let matches = build_cli().get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let action = match matches_to_action(&matches) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let path = matches
        .get_one::<String>("db")
        .map(|s| s.as_str())
        .unwrap_or("chronolog.json");

    let db = match Database::open(path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to open store: {}", e);
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = run(&db, action, &mut out).and_then(|()| db.close().map_err(|e| e.to_string()));
    let exit_code = match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    };
    if let Err(e) = out.flush() {
        eprintln!("{}", e);
        process::exit(1);
    }
    process::exit(exit_code);
}

fn run<W: Write>(db: &Database, action: Action, out: &mut W) -> Result<(), String> {
    match action {
        Action::Tail { n } => print_values(out, db.get_latest(n)),
        Action::Range { start, end } => print_values(out, db.get_by_time_range(start, end)),
        Action::Count => print_line(out, db.len()),
        Action::Append { payload } => {
            db.add(&payload).map_err(|e| e.to_string())?;
            print_line(out, 1)
        }
        Action::Prune { cutoff } => {
            let removed = db.delete_before(cutoff).map_err(|e| e.to_string())?;
            print_line(out, removed)
        }
        Action::Clear => {
            let removed = db.delete_all().map_err(|e| e.to_string())?;
            print_line(out, removed)
        }
    }
}

fn print_values<W: Write>(
    out: &mut W,
    values: chronolog::Result<Vec<Value>>,
) -> Result<(), String> {
    for value in values.map_err(|e| e.to_string())? {
        let line = serde_json::to_string(&value).map_err(|e| e.to_string())?;
        print_line(out, line)?;
    }
    Ok(())
}

fn print_line<W: Write>(out: &mut W, line: impl std::fmt::Display) -> Result<(), String> {
    writeln!(out, "{}", line).map_err(|e| e.to_string())
}
