/// CLI Commands

pub const HELP: &str = "help";
pub const PLAN: &str = "plan";
pub const PAYMENT: &str = "payment";
pub const QUIT: &str = "quit";

/// Various CLI constants

pub const PROMPT: &str = "> ";
pub const SEPARATOR: &str = "--";
