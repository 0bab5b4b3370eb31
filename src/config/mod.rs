pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use crate::output::{OutputFormat, ReportKind};
use provenance::ProvenanceMap;
use std::path::PathBuf;

/// Fully resolved configuration. No Option fields.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub format: OutputFormat,
    pub report: ReportKind,
    pub quiet: bool,
    /// Exit non-zero when the new specification breaks callers of the old one.
    pub fail_on_incompatible: bool,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            report: ReportKind::Incompatibilities,
            quiet: false,
            fail_on_incompatible: true,
            provenance: ProvenanceMap::new(),
            loaded_files: Vec::new(),
        }
    }
}
