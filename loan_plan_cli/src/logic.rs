//! The local REPL: plans are computed in-process.

use loan_plan_common::cli::constants::*;
use loan_plan_common::cli::helpers::*;
use loan_plan_common::engine;
use loan_plan_common::errors::PlanError;
use loan_plan_common::types::PeriodRecord;
use loan_plan_common::CliType;
use rust_decimal::Decimal;

pub fn main_loop() {
    run(|| read_from_stdin(PROMPT));
}

/// **Runs commands until `quit` or the end of input**
///
/// Wrapped by `main_loop()` so we can unit-test it with scripted input.
fn run(mut next_input: impl FnMut() -> Input) {
    loop {
        match next_input() {
            Input::Line(line) => {
                let words = line.split_whitespace().collect::<Vec<_>>();
                let cmd = words[0].to_lowercase();

                match cmd.as_str() {
                    HELP | "h" => help(CliType::NonWeb),
                    PLAN | "p" => plan(&words),
                    PAYMENT | "m" => payment(&words),
                    QUIT | "q" => break,
                    _ => println!("Unrecognized command; try `help`."),
                }
            }
            Input::Empty => continue,
            Input::Eof => break,
        }
    }
}

/// **Prints the amortization schedule of a loan**
///
/// `plan <amount> <nominal rate %> <months> <start date>`
///
/// The rate is a yearly percentage, so `5` means 5%.
/// The start date is either `2018-01-01T00:00:00Z` or `2018-01-01`.
///
/// Prints the schedule, or an error message if the words can't be
/// parsed or the values can't produce a plan.
fn plan(words: &[&str]) {
    match compute_plan(words) {
        Ok(schedule) => print_schedule(&schedule),
        Err(err) => eprintln!("[ERROR] {}", err),
    }
}

/// Wrapped by `plan()` so we can unit-test it.
fn compute_plan(words: &[&str]) -> Result<Vec<PeriodRecord>, PlanError> {
    let request = parse_plan_args(words)?;
    engine::generate_plan(&request)
}

/// **Prints the fixed monthly payment of a loan**
///
/// `payment <amount> <nominal rate %> <months>`
fn payment(words: &[&str]) {
    match compute_payment(words) {
        Ok(amount) => println!("Monthly payment: {:.2}", amount),
        Err(err) => eprintln!("[ERROR] {}", err),
    }
}

/// Wrapped by `payment()` so we can unit-test it.
fn compute_payment(words: &[&str]) -> Result<Decimal, PlanError> {
    let (loan_amount, nominal_rate, duration) = parse_payment_args(words)?;
    engine::compute_monthly_payment(nominal_rate, loan_amount, duration)
}
