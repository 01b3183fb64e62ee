//! The type of the CLI application
//!
//! It can be:
//! - NonWeb
//! - Web
//!
//! Both CLI apps share the command parsing and the printing of schedules,
//! which live in [`helpers`](super::helpers). They differ only in where
//! a plan is computed: in-process, or by the web service.

/// **The type of the CLI application**
///
/// It can be:
/// - NonWeb
/// - Web
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CliType {
    /// Computes plans in-process
    NonWeb,

    /// Requests plans from the web service
    Web,
}
