pub mod cli;
pub mod core;
pub mod errors;
pub mod format;
pub mod requests;
pub mod validation;

pub use self::cli::cli_type::CliType;
pub use self::core::{engine, types};
pub use requests::*;
