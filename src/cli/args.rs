//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "xiphos", version, about = "Compact full-text search and release tooling")]
pub struct XiphosArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Increase output verbosity (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl XiphosArgs {
    /// Default log level filter derived from the verbosity flags.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print version information
    Version,
    /// Bundle prebuilt artifacts for a release
    Bundle(BundleArgs),
}

/// Arguments for the `bundle` subcommand.
#[derive(Debug, Args)]
pub struct BundleArgs {
    /// Release version string, used verbatim in artifact names
    pub release: String,

    /// Base directory artifact patterns are resolved against
    #[arg(long, default_value = ".")]
    pub base: PathBuf,

    /// Directory the bundle directory is created in
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Product name used as the artifact prefix
    #[arg(long, default_value = "xiphos")]
    pub name: String,

    /// Archive group, as NAME=PATTERN[,PATTERN...]; repeatable
    #[arg(long = "archive", value_name = "NAME=PATTERNS")]
    pub archives: Vec<String>,

    /// Standalone file (or pattern) to copy and checksum; repeatable
    #[arg(long = "file", value_name = "PATTERN")]
    pub files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bundle_command() {
        let args = XiphosArgs::parse_from([
            "xiphos",
            "bundle",
            "1.4.2",
            "--out",
            "/tmp/dist",
            "--archive",
            "tools=bin/tool-*",
            "--archive",
            "examples=bin/example-*,bin/demo-*",
            "--file",
            "README.md",
        ]);

        match args.command {
            Command::Bundle(bundle) => {
                assert_eq!(bundle.release, "1.4.2");
                assert_eq!(bundle.out, PathBuf::from("/tmp/dist"));
                assert_eq!(bundle.archives.len(), 2);
                assert_eq!(bundle.files, ["README.md"]);
            }
            _ => panic!("expected bundle subcommand"),
        }
    }

    #[test]
    fn test_verbosity_to_log_filter() {
        let quiet = XiphosArgs::parse_from(["xiphos", "-q", "version"]);
        assert_eq!(quiet.log_filter(), "error");

        let default = XiphosArgs::parse_from(["xiphos", "version"]);
        assert_eq!(default.log_filter(), "info");

        let debug = XiphosArgs::parse_from(["xiphos", "-v", "version"]);
        assert_eq!(debug.log_filter(), "debug");

        let trace = XiphosArgs::parse_from(["xiphos", "-vvv", "version"]);
        assert_eq!(trace.log_filter(), "trace");
    }
}
