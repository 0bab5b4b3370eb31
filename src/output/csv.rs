use crate::diff::ChangeEntry;
use crate::errors::Result;
use crate::output::{describe, split_endpoint, Section, SectionBody};
use std::borrow::Cow;
use std::io::Write;

pub const HEADER: &str = "Endpoint,OperationId,Change,Category,Sub Category,Attribute";

/// Quote a field when it contains a delimiter, quote or line break (RFC 4180).
fn field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Sub-category and attribute cells of one entry.
pub fn entry_cells(entry: &ChangeEntry) -> (String, String) {
    let (label, subject) = describe(entry);
    (label, subject.unwrap_or("n/a").to_string())
}

fn write_row<W: Write>(writer: &mut W, cells: &[&str]) -> Result<()> {
    let line = cells
        .iter()
        .map(|cell| field(cell))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{line}")?;
    Ok(())
}

/// Write report sections as flat rows.
///
/// The header is only written when at least one row follows it.
pub(crate) fn write_report<W: Write>(writer: &mut W, sections: &[Section<'_>]) -> Result<()> {
    if sections.iter().all(Section::is_empty) {
        return Ok(());
    }
    writeln!(writer, "{HEADER}")?;

    for section in sections {
        match section.body {
            SectionBody::Endpoints(endpoints) => {
                for endpoint in endpoints {
                    let (url, operation_id) = split_endpoint(endpoint);
                    write_row(
                        writer,
                        &[url, operation_id, section.nature, section.category.label()],
                    )?;
                }
            }
            SectionBody::Entries(entries) => {
                for (endpoint, entries) in entries {
                    let (url, operation_id) = split_endpoint(endpoint);
                    for entry in entries {
                        let (sub_category, attribute) = entry_cells(entry);
                        write_row(
                            writer,
                            &[
                                url,
                                operation_id,
                                section.nature,
                                section.category.label(),
                                sub_category.as_str(),
                                attribute.as_str(),
                            ],
                        )?;
                    }
                }
            }
        }
    }
    Ok(())
}
