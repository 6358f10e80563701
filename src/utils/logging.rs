// file: src/utils/logging.rs
// description: Tracing subscriber initialization and colored CLI status lines

use colored::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init_logger(colored_output: bool, verbose: bool) {
    let default_level = if verbose { "wordsearch=debug,info" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(verbose)
        .with_line_number(verbose)
        .compact()
        .with_ansi(colored_output);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg.yellow())
}

pub fn format_info(msg: &str) -> String {
    format!("{} {}", "ℹ".blue().bold(), msg)
}

/// One row of the positive control table.
pub fn format_case(name: &str, expected: bool, actual: bool, passed: bool) -> String {
    let status = if passed {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    };
    format!(
        "{} {:<28} expected={:<5} actual={:<5}",
        status, name, expected, actual
    )
}
