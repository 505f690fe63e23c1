//! Command-line interface for the xiphos binary.

pub mod args;
pub mod commands;

pub use self::args::{BundleArgs, Command, XiphosArgs};
pub use self::commands::execute_command;
