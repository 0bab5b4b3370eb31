use crate::diff::ChangeEntry;
use crate::errors::Result;
use crate::output::{describe, Section, SectionBody};
use std::io::Write;

/// Human-readable form of one entry, e.g. `missing request param: body/user/name`.
pub fn entry_message(entry: &ChangeEntry) -> String {
    if let ChangeEntry::NoLongerRequiredParam { path } = entry {
        return format!("{path} is no longer required");
    }
    match describe(entry) {
        (label, Some(subject)) => format!("{label}: {subject}"),
        (label, None) => label,
    }
}

/// Write report sections as a nested bullet list, skipping empty sections.
pub(crate) fn write_report<W: Write>(writer: &mut W, sections: &[Section<'_>]) -> Result<()> {
    for section in sections.iter().filter(|s| !s.is_empty()) {
        writeln!(writer, "- {} {}", section.nature, section.category.label())?;
        match section.body {
            SectionBody::Endpoints(endpoints) => {
                for endpoint in endpoints {
                    writeln!(writer, "  - {endpoint}")?;
                }
            }
            SectionBody::Entries(entries) => {
                for (endpoint, entries) in entries.iter().filter(|(_, e)| !e.is_empty()) {
                    writeln!(writer, "  - {endpoint}")?;
                    for entry in entries {
                        writeln!(writer, "    - {}", entry_message(entry))?;
                    }
                }
            }
        }
    }
    Ok(())
}
