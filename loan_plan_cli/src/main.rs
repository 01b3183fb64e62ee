//! The "Loan Plan CLI" app's entry point.

use loan_plan_cli::logic::main_loop;

/// The "Loan Plan CLI" app's entry point.
fn main() {
    main_loop();
}
