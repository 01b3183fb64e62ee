pub mod cli_type;
pub mod constants;
pub mod helpers;
