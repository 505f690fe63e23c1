//! Subcommand execution.

use crate::bundle::{ArchiveSpec, BundleSpec, Bundler};
use crate::cli::args::{BundleArgs, Command, XiphosArgs};
use crate::error::{Result, XiphosError};

/// Execute the parsed command.
pub fn execute_command(args: XiphosArgs) -> Result<()> {
    match args.command {
        Command::Version => execute_version(),
        Command::Bundle(bundle) => execute_bundle(bundle),
    }
}

fn execute_version() -> Result<()> {
    println!("xiphos {}", crate::VERSION);
    println!(
        "major={} minor={} patch={}",
        crate::major_version(),
        crate::minor_version(),
        crate::patch_version()
    );
    Ok(())
}

/// Parse a `NAME=PATTERN[,PATTERN...]` archive argument.
fn parse_archive_spec(raw: &str) -> Result<ArchiveSpec> {
    let (name, patterns) = raw.split_once('=').ok_or_else(|| {
        XiphosError::invalid_argument(format!("Archive spec must be NAME=PATTERNS: {raw:?}"))
    })?;
    if name.is_empty() {
        return Err(XiphosError::invalid_argument(format!(
            "Archive spec has an empty name: {raw:?}"
        )));
    }
    let patterns: Vec<String> = patterns
        .split(',')
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
        .collect();
    if patterns.is_empty() {
        return Err(XiphosError::invalid_argument(format!(
            "Archive spec has no patterns: {raw:?}"
        )));
    }
    Ok(ArchiveSpec::new(name, patterns))
}

fn execute_bundle(args: BundleArgs) -> Result<()> {
    let mut spec = BundleSpec::new(&args.name, &args.release, args.out.clone());
    for raw in &args.archives {
        spec = spec.archive(parse_archive_spec(raw)?);
    }
    for file in &args.files {
        spec = spec.file(file);
    }

    let report = Bundler::new(spec).run(&args.base)?;

    println!("{}", report.output_dir.display());
    for artifact in &report.artifacts {
        println!("{}  {}", artifact.sha256, artifact.name);
    }
    Ok(())
}
