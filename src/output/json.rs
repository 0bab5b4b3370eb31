use crate::diff::{ChangeSet, IncompatibilitySet, Summary};
use crate::errors::Result;
use crate::output::Report;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ChangesOutput<'r> {
    compatible: bool,
    summary: Summary,
    changes: &'r ChangeSet,
}

#[derive(Debug, Serialize)]
struct IncompatibilitiesOutput<'r> {
    compatible: bool,
    summary: Summary,
    incompatibilities: &'r IncompatibilitySet,
}

/// Write a report as pretty-printed JSON.
pub(crate) fn write_report<W: Write>(writer: &mut W, report: Report<'_>) -> Result<()> {
    let compatible = report.is_compatible();
    match report {
        Report::Changes(changes) => serde_json::to_writer_pretty(
            &mut *writer,
            &ChangesOutput {
                compatible,
                summary: changes.summary(),
                changes,
            },
        )?,
        Report::Incompatibilities(incompatibilities) => serde_json::to_writer_pretty(
            &mut *writer,
            &IncompatibilitiesOutput {
                compatible,
                summary: incompatibilities.summary(),
                incompatibilities,
            },
        )?,
    }
    writeln!(writer)?;
    Ok(())
}
