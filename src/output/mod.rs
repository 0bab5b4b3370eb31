pub mod csv;
pub mod json;
pub mod text;

use crate::diff::{ChangeEntry, ChangeSet, EntryMap, IncompatibilitySet};
use crate::errors::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Default, Clone, Copy, ValueEnum, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Hierarchical, human-readable bullet list
    #[default]
    Text,
    /// Flat rows with a header line
    Csv,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "yaml" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Which report the caller asked for.
#[derive(Debug, Default, Clone, Copy, ValueEnum, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Every difference, informational or breaking
    Changes,
    /// Only differences that break existing callers
    #[default]
    Incompatibilities,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Changes => write!(f, "changes"),
            ReportKind::Incompatibilities => write!(f, "incompatibilities"),
        }
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "changes" => Ok(ReportKind::Changes),
            "incompatibilities" => Ok(ReportKind::Incompatibilities),
            other => Err(format!("unknown report: {other}")),
        }
    }
}

/// Which collection to render.
#[derive(Debug, Clone, Copy)]
pub enum Report<'r> {
    Changes(&'r ChangeSet),
    Incompatibilities(&'r IncompatibilitySet),
}

impl<'r> Report<'r> {
    pub fn is_compatible(&self) -> bool {
        match self {
            Report::Changes(changes) => changes.is_compatible(),
            Report::Incompatibilities(set) => set.is_empty(),
        }
    }

    /// Categories in rendering order.
    pub(crate) fn sections(&self) -> Vec<Section<'r>> {
        match *self {
            Report::Changes(changes) => vec![
                Section::endpoints("new", &changes.new_endpoints),
                Section::endpoints("removed", &changes.removed_endpoints),
                Section::entries("new", Category::RequestParams, &changes.new_request_params),
                Section::entries(
                    "removed",
                    Category::RequestParams,
                    &changes.removed_request_params,
                ),
                Section::entries(
                    "new",
                    Category::ResponseAttributes,
                    &changes.new_response_attributes,
                ),
                Section::entries(
                    "removed",
                    Category::ResponseAttributes,
                    &changes.removed_response_attributes,
                ),
            ],
            Report::Incompatibilities(set) => vec![
                Section::endpoints("missing", &set.endpoints),
                Section::entries("incompatible", Category::RequestParams, &set.request_params),
                Section::entries(
                    "incompatible",
                    Category::ResponseAttributes,
                    &set.response_attributes,
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Category {
    Endpoints,
    RequestParams,
    ResponseAttributes,
}

impl Category {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Category::Endpoints => "endpoints",
            Category::RequestParams => "request params",
            Category::ResponseAttributes => "response attributes",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum SectionBody<'r> {
    Endpoints(&'r [String]),
    Entries(&'r EntryMap),
}

/// One heading of a report: a nature ("new", "missing", ...) applied to a category.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Section<'r> {
    pub nature: &'static str,
    pub category: Category,
    pub body: SectionBody<'r>,
}

impl<'r> Section<'r> {
    fn endpoints(nature: &'static str, endpoints: &'r [String]) -> Self {
        Self {
            nature,
            category: Category::Endpoints,
            body: SectionBody::Endpoints(endpoints),
        }
    }

    fn entries(nature: &'static str, category: Category, entries: &'r EntryMap) -> Self {
        Self {
            nature,
            category,
            body: SectionBody::Entries(entries),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self.body {
            SectionBody::Endpoints(endpoints) => endpoints.is_empty(),
            SectionBody::Entries(entries) => entries.values().all(Vec::is_empty),
        }
    }
}

/// Sub-category label and subject of an entry. A missing subject is rendered as `n/a`.
pub(crate) fn describe(entry: &ChangeEntry) -> (String, Option<&str>) {
    match entry {
        ChangeEntry::NewRequiredParam { path } => {
            ("new required request param".to_string(), Some(path.as_str()))
        }
        ChangeEntry::NoLongerRequiredParam { path } => {
            ("no longer required".to_string(), Some(path.as_str()))
        }
        ChangeEntry::NewParam { path } => ("new request param".to_string(), Some(path.as_str())),
        ChangeEntry::MissingParam { path } => {
            ("missing request param".to_string(), Some(path.as_str()))
        }
        ChangeEntry::NewAttribute { code, path } => {
            (format!("new attribute for {code} response"), Some(path.as_str()))
        }
        ChangeEntry::MissingAttribute { code, path } => {
            (format!("missing attribute from {code} response"), Some(path.as_str()))
        }
        ChangeEntry::NewStatusCode { code } => (format!("new {code} response"), None),
        ChangeEntry::MissingStatusCode { code } => (format!("missing {code} response"), None),
    }
}

/// Split `"METHOD /path operationId:ID"` into `("METHOD /path", "ID")`.
pub(crate) fn split_endpoint(endpoint: &str) -> (&str, &str) {
    endpoint
        .split_once(" operationId:")
        .unwrap_or((endpoint, ""))
}

/// Write a report in the requested format.
pub fn write_report<W: Write>(
    writer: &mut W,
    report: Report<'_>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => text::write_report(writer, &report.sections()),
        OutputFormat::Csv => csv::write_report(writer, &report.sections()),
        OutputFormat::Json => json::write_report(writer, report),
    }
}

/// Render a report into a single string.
pub fn render(report: Report<'_>, format: OutputFormat) -> Result<String> {
    let mut buf = Vec::new();
    write_report(&mut buf, report, format)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
