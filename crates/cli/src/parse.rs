//! ArgMatches → Action conversion.

use chronolog::{Timestamp, Value};
use clap::ArgMatches;

/// A parsed command, ready to run against an open store.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Tail { n: usize },
    Range { start: Timestamp, end: Timestamp },
    Count,
    Append { payload: Value },
    Prune { cutoff: Timestamp },
    Clear,
}

/// Convert clap ArgMatches into an Action.
pub fn matches_to_action(matches: &ArgMatches) -> Result<Action, String> {
    let (sub_name, m) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "tail" => {
            let n = m.get_one::<usize>("n").copied().unwrap_or(10);
            Ok(Action::Tail { n })
        }
        "range" => Ok(Action::Range {
            start: timestamp_arg(m, "start")?,
            end: timestamp_arg(m, "end")?,
        }),
        "count" => Ok(Action::Count),
        "append" => {
            let raw = required(m, "json")?;
            let payload = serde_json::from_str(raw)
                .map_err(|e| format!("Invalid JSON payload: {}", e))?;
            Ok(Action::Append { payload })
        }
        "prune" => Ok(Action::Prune {
            cutoff: timestamp_arg(m, "cutoff")?,
        }),
        "clear" => Ok(Action::Clear),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn required<'a>(m: &'a ArgMatches, name: &str) -> Result<&'a str, String> {
    m.get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("Missing argument: {}", name))
}

fn timestamp_arg(m: &ArgMatches, name: &str) -> Result<Timestamp, String> {
    let raw = required(m, name)?;
    Timestamp::parse_rfc3339(raw).map_err(|e| format!("Invalid {}: {}", name, e))
}
