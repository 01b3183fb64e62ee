//! Helper functions that are common to CLI apps

use crate::cli::cli_type::CliType;
use crate::cli::constants::*;
use crate::errors::PlanError;
use crate::format::timestamp;
use crate::requests::LoanRequest;
use crate::types::PeriodRecord;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::io::{stdin, stdout, BufRead, Write};
use std::str::FromStr;

/// **Contains full variants of the commands that the given CLI type supports.**
///
/// Wrapped by `help()` so we can unit-test the contents,
/// so that we don't forget to include a newly-added command to help.
fn help_contents_full(cli_type: CliType) -> String {
    match cli_type {
        CliType::NonWeb => format!("{HELP} {PLAN} {PAYMENT} {QUIT}"),
        CliType::Web => format!("{HELP} {PLAN} {QUIT}"),
    }
}

/// **Contains short variants of the commands that the given CLI type supports.**
fn help_contents_short(cli_type: CliType) -> String {
    match cli_type {
        CliType::NonWeb => "h p m q".to_string(),
        CliType::Web => "h p q".to_string(),
    }
}

/// **Prints all supported commands in their full and short variants, with usage.**
pub fn help(cli_type: CliType) {
    println!("{}", help_contents_full(cli_type));
    println!("{}", help_contents_short(cli_type));
    println!("{PLAN} <amount> <nominal rate %> <months> <start date>");
    if cli_type == CliType::NonWeb {
        println!("{PAYMENT} <amount> <nominal rate %> <months>");
    }
}

/// **One line of user input**
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    /// A line with something on it
    Line(String),

    /// A blank line, which the main loop ignores
    Empty,

    /// End of input, or a closed terminal; the main loop stops
    Eof,
}

/// **Reads one line from `reader`.**
///
/// Wrapped by `read_from_stdin()` so we can unit-test it.
fn read_line_from<R: BufRead>(reader: &mut R) -> Input {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => Input::Eof,
        Ok(_) => {
            if line.trim().is_empty() {
                Input::Empty
            } else {
                Input::Line(line)
            }
        }
        Err(err) => {
            eprintln!("[ERROR] Failed to read line: {}", err);
            Input::Eof
        }
    }
}

/// **Prints `label` and reads standard input into a line.**
///
/// Signals an empty line so we can ignore it, and the end of input
/// so we can stop (in the main loop). A prompt that can't be written
/// means nobody is listening anymore, which also ends the input.
pub fn read_from_stdin(label: &str) -> Input {
    let mut out = stdout().lock();
    if write!(out, "\n{label}").and_then(|_| out.flush()).is_err() {
        return Input::Eof;
    }
    drop(out);

    read_line_from(&mut stdin().lock())
}

fn parse_decimal(word: &str, what: &str) -> Result<Decimal, PlanError> {
    Decimal::from_str(word).map_err(|_| {
        PlanError::MalformedRequest(format!(
            "{} must be a decimal number; you provided '{}'",
            what, word
        ))
    })
}

fn parse_duration(word: &str) -> Result<i64, PlanError> {
    word.parse::<i64>().map_err(|_| {
        PlanError::MalformedRequest(format!(
            "The duration must be a whole number of months; you provided '{}'",
            word
        ))
    })
}

/// **Parses a start date**
///
/// Takes a full timestamp like `2018-01-01T00:00:00Z`,
/// or just a date like `2018-01-01`, which means midnight UTC.
pub fn parse_start_date(word: &str) -> Result<DateTime<Utc>, PlanError> {
    if let Ok(date) = timestamp::parse(word) {
        return Ok(date);
    }

    NaiveDate::parse_from_str(word, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| {
            PlanError::MalformedRequest(format!(
                "The start date must look like 2018-01-01T00:00:00Z or 2018-01-01; you provided '{}'",
                word
            ))
        })
}

/// **Parses the arguments of the `plan` command**
///
/// `plan <amount> <nominal rate %> <months> <start date>`
///
/// Only decodes the words; the values themselves are validated by the engine.
pub fn parse_plan_args(words: &[&str]) -> Result<LoanRequest, PlanError> {
    if words.len() != 5 {
        return Err(PlanError::MalformedRequest(format!(
            "The plan command: {PLAN} <amount> <nominal rate %> <months> <start date>"
        )));
    }

    Ok(LoanRequest {
        loan_amount: parse_decimal(words[1], "The loan amount")?,
        nominal_rate: parse_decimal(words[2], "The nominal rate")?,
        duration: parse_duration(words[3])?,
        start_date: parse_start_date(words[4])?,
    })
}

/// **Parses the arguments of the `payment` command**
///
/// `payment <amount> <nominal rate %> <months>`
///
/// Returns `(loan_amount, nominal_rate, duration)`.
pub fn parse_payment_args(words: &[&str]) -> Result<(Decimal, Decimal, i64), PlanError> {
    if words.len() != 4 {
        return Err(PlanError::MalformedRequest(format!(
            "The payment command: {PAYMENT} <amount> <nominal rate %> <months>"
        )));
    }

    Ok((
        parse_decimal(words[1], "The loan amount")?,
        parse_decimal(words[2], "The nominal rate")?,
        parse_duration(words[3])?,
    ))
}

/// **Renders a schedule as a table, one line per month**
///
/// Wrapped by `print_schedule()` so we can unit-test the contents.
pub fn format_schedule(schedule: &[PeriodRecord]) -> String {
    let mut table = format!(
        "{:>4}  {:<10}  {:>14}  {:>10}  {:>12}  {:>12}  {:>14}\n",
        "#", "Date", "Opening", "Interest", "Principal", "Payment", "Closing"
    );
    table.push_str(&SEPARATOR.repeat(44));
    table.push('\n');

    for (i, record) in schedule.iter().enumerate() {
        table.push_str(&format!(
            "{:>4}  {:<10}  {:>14}  {:>10}  {:>12}  {:>12}  {:>14}\n",
            i + 1,
            record.date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", record.initial_outstanding_principal),
            format!("{:.2}", record.interest),
            format!("{:.2}", record.principal),
            format!("{:.2}", record.borrower_payment_amount),
            format!("{:.2}", record.remaining_outstanding_principal),
        ));
    }

    table
}

/// **Prints a schedule and its totals**
pub fn print_schedule(schedule: &[PeriodRecord]) {
    print!("{}", format_schedule(schedule));

    let total_paid: Decimal = schedule
        .iter()
        .map(|record| record.borrower_payment_amount)
        .sum();
    let total_interest: Decimal = schedule.iter().map(|record| record.interest).sum();
    println!(
        "\nTotal paid: {:.2}, of which interest: {:.2}",
        total_paid, total_interest
    );
}
