use crate::config::resolve::{resolve_config, CliOverrides};
use crate::config::ResolvedConfig;
use crate::diff::ChangeClassifier;
use crate::errors::Result;
use crate::output::{OutputFormat, Report, ReportKind};
use crate::spec::openapi::load_specification;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Specification callers were built against
    pub old: PathBuf,

    /// Specification being proposed
    pub new: PathBuf,

    /// Which report to print
    #[arg(long)]
    pub report: Option<ReportKind>,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Exit 0 even when the new specification is incompatible
    #[arg(long)]
    pub no_fail: bool,

    /// Suppress the status line on stderr
    #[arg(long)]
    pub quiet: bool,
}

impl DiffArgs {
    fn to_cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            format: self.format,
            report: self.report,
            quiet: self.quiet,
            no_fail: self.no_fail,
        }
    }
}

pub fn run(args: &DiffArgs) -> Result<()> {
    let start = Instant::now();
    let config = resolve_config(&std::env::current_dir()?, &args.to_cli_overrides())?;

    let (old, new) = rayon::join(
        || load_specification(&args.old),
        || load_specification(&args.new),
    );
    let (old, new) = (old?, new?);

    let classifier = ChangeClassifier::new(&old, &new);
    let compatible = classifier.compatible();

    let mut stdout = std::io::stdout().lock();
    write(&mut stdout, &classifier, &config)?;
    stdout.flush()?;

    if !config.quiet {
        eprintln!(
            "{} -> {}: {} ({}ms)",
            args.old.display(),
            args.new.display(),
            if compatible { "compatible" } else { "incompatible" },
            start.elapsed().as_millis()
        );
    }

    if !compatible && config.fail_on_incompatible {
        std::process::exit(1);
    }

    Ok(())
}

fn write<W: Write>(
    writer: &mut W,
    classifier: &ChangeClassifier<'_>,
    config: &ResolvedConfig,
) -> Result<()> {
    let report = match config.report {
        ReportKind::Changes => Report::Changes(classifier.changes()),
        ReportKind::Incompatibilities => Report::Incompatibilities(classifier.incompatibilities()),
    };
    crate::output::write_report(writer, report, config.format)
}
