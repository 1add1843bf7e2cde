//! flatdb - single-command CLI
//!
//! Each invocation parses and executes exactly one command against the
//! data directory, prints the result and exits. Recognized outcomes,
//! including query errors, exit 0; a missing command argument or a stray
//! extra argument is a usage failure.

use std::env;
use std::process::ExitCode;

use anyhow::Result;

use flatdb::executor::{Engine, QueryResult};
use flatdb::sql::Parser;
use flatdb::storage::FileStore;

const DEFAULT_DATA_DIR: &str = "database";

fn print_usage(program: &str) {
    eprintln!("Usage: {} [--json] '<command>'", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  CREATE TABLE <name> (<col>, ...)");
    eprintln!("  INSERT INTO <name> VALUES (<value>, ...)");
    eprintln!("  DESC <name>");
    eprintln!("  SELECT <cols> FROM <name> [WHERE <col> <op> <value>]");
    eprintln!("  SELECT <cols> FROM <a> JOIN <b> ON <a.col> = <b.col> [WHERE ...]");
    eprintln!();
    eprintln!("The data directory defaults to '{}' and can be", DEFAULT_DATA_DIR);
    eprintln!("overridden with FLATDB_DATA_DIR.");
}

/// Plain-text rendering: message, or header line plus one line per row
fn print_plain(result: &QueryResult) {
    if let Some(msg) = &result.message {
        println!("{}", msg);
        return;
    }
    if !result.columns.is_empty() {
        println!("{}", result.columns.join(","));
    }
    for row in &result.rows {
        println!("{}", row.to_line());
    }
}

fn run(query: &str, json: bool) -> Result<()> {
    let data_dir = env::var("FLATDB_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let engine = Engine::new(FileStore::new(data_dir));

    let outcome = Parser::new(query)
        .and_then(|mut parser| parser.parse())
        .and_then(|command| engine.execute(command));

    match outcome {
        Ok(result) => {
            if json {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                print_plain(&result);
            }
        }
        // Query-level failures are ordinary output, not process failures.
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

/// Parse command-line arguments into (json flag, query)
///
/// Returns `None` when the query is missing or a second positional
/// argument appears; both are usage errors.
fn parse_args(args: impl Iterator<Item = String>) -> Option<(bool, String)> {
    let mut json = false;
    let mut query = None;
    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            _ if query.is_none() => query = Some(arg),
            _ => return None,
        }
    }
    query.map(|q| (json, q))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "flatdb".to_string());

    let Some((json, query)) = parse_args(args) else {
        print_usage(&program);
        return ExitCode::FAILURE;
    };

    match run(&query, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Option<(bool, String)> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_arg_parsing() {
        assert_eq!(args(&["DESC t"]), Some((false, "DESC t".to_string())));
        assert_eq!(
            args(&["--json", "DESC t"]),
            Some((true, "DESC t".to_string()))
        );
        assert_eq!(
            args(&["DESC t", "--json"]),
            Some((true, "DESC t".to_string()))
        );
        assert_eq!(args(&[]), None);
        assert_eq!(args(&["--json"]), None);
    }

    #[test]
    fn test_extra_positional_is_a_usage_error() {
        // A second query must not silently replace the first.
        assert_eq!(args(&["DESC t", "DESC u"]), None);
    }
}
