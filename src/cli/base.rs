//! Base functionality for the feed search CLI
//!
//! This module provides core utilities and traits used across the CLI including:
//! - Result printing with exit codes
//! - Colored JSON output when attached to a terminal
//! - The trait every subcommand implements

use atty::Stream;
use colored::Colorize;
use colored_json::prelude::*;
use serde::Serialize;

use crate::client::{print_error, BaseClient};
use crate::error::SearchError;

/// Prints a search result and exits with a matching code
///
/// # Arguments
/// * `result` - The data to print, or the error that prevented getting it
///
/// # Type Parameters
/// * `T` - The type of data contained in a successful result
pub fn evaluate_and_print_response<T: Serialize>(result: Result<T, SearchError>) {
    match result {
        Ok(data) => match serde_json::to_string_pretty(&data) {
            Ok(json) => {
                redirect_stream(&json);
                std::process::exit(exitcode::OK);
            }
            Err(err) => {
                print_error(err.to_string());
                std::process::exit(exitcode::SOFTWARE);
            }
        },
        Err(err) => {
            print_error(err.to_string());
            std::process::exit(exit_code(&err));
        }
    }
}

/// Exit code reported for a failed search
pub fn exit_code(err: &SearchError) -> exitcode::ExitCode {
    match err {
        SearchError::InvalidEndpoint(_) => exitcode::CONFIG,
        SearchError::TransportFailure(_) => exitcode::UNAVAILABLE,
        SearchError::DecodeFailure(_) => exitcode::DATAERR,
    }
}

/// Writes JSON to stdout, decorated only when stdout is a terminal
///
/// If users are redirecting the output to a file, we don't want to print
/// the success message but only the JSON to ensure that the output
/// is clean and can be used in other scripts
pub fn redirect_stream(json_str: &str) {
    if atty::is(Stream::Stdout) {
        println!("{}", success_message());
        match json_str.to_colored_json_auto() {
            Ok(colored) => println!("{}\n", colored),
            Err(_) => println!("{}\n", json_str),
        }
    } else {
        println!("{}", json_str);
    }
}

/// Returns a formatted success message string
fn success_message() -> String {
    format!(
        "{} {} - Received the following response: \n",
        "└── ".bold(),
        "🎉 Success!".green().bold()
    )
}

/// Trait for processing CLI subcommands
///
/// Implementors define how to handle their specific subcommand variant
/// using the provided feed client.
pub trait Matcher {
    /// Process this subcommand using the given client
    ///
    /// # Arguments
    /// * `client` - The BaseClient for making feed requests
    fn process(self, client: &BaseClient);
}
