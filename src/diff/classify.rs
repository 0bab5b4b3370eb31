use crate::diff::engine::DiffEngine;
use crate::diff::entry::ChangeEntry;
use crate::spec::SpecificationView;
use serde::Serialize;
use std::cell::OnceCell;
use std::collections::BTreeMap;

/// Endpoint id -> entries in discovery order. Keys iterate lexicographically.
pub type EntryMap = BTreeMap<String, Vec<ChangeEntry>>;

/// Every difference between two specifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    pub new_endpoints: Vec<String>,
    pub removed_endpoints: Vec<String>,
    pub new_request_params: EntryMap,
    pub removed_request_params: EntryMap,
    pub new_response_attributes: EntryMap,
    pub removed_response_attributes: EntryMap,
}

/// The subset of differences that break callers of the old specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IncompatibilitySet {
    pub endpoints: Vec<String>,
    pub request_params: EntryMap,
    pub response_attributes: EntryMap,
}

/// Per-category counts of a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub endpoints_added: usize,
    pub endpoints_removed: usize,
    pub request_param_changes: usize,
    pub request_param_incompatibilities: usize,
    pub response_attribute_changes: usize,
    pub response_attribute_incompatibilities: usize,
}

fn entry_count(map: &EntryMap) -> usize {
    map.values().map(Vec::len).sum()
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.new_endpoints.is_empty()
            && self.removed_endpoints.is_empty()
            && self.new_request_params.is_empty()
            && self.removed_request_params.is_empty()
            && self.new_response_attributes.is_empty()
            && self.removed_response_attributes.is_empty()
    }

    /// The "removed" categories are exactly the incompatibilities.
    pub fn is_compatible(&self) -> bool {
        self.removed_endpoints.is_empty()
            && self.removed_request_params.is_empty()
            && self.removed_response_attributes.is_empty()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            endpoints_added: self.new_endpoints.len(),
            endpoints_removed: self.removed_endpoints.len(),
            request_param_changes: entry_count(&self.new_request_params),
            request_param_incompatibilities: entry_count(&self.removed_request_params),
            response_attribute_changes: entry_count(&self.new_response_attributes),
            response_attribute_incompatibilities: entry_count(&self.removed_response_attributes),
        }
    }
}

impl IncompatibilitySet {
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
            && self.request_params.is_empty()
            && self.response_attributes.is_empty()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            endpoints_removed: self.endpoints.len(),
            request_param_incompatibilities: entry_count(&self.request_params),
            response_attribute_incompatibilities: entry_count(&self.response_attributes),
            ..Summary::default()
        }
    }
}

/// Collect `(endpoint, entry)` pairs into a map, keeping first-seen entry order.
pub fn group_by_endpoint<'s>(
    pairs: impl IntoIterator<Item = (&'s str, ChangeEntry)>,
) -> EntryMap {
    let mut grouped = EntryMap::new();
    for (endpoint, entry) in pairs {
        grouped.entry(endpoint.to_string()).or_default().push(entry);
    }
    grouped
}

/// Compatibility verdict plus the two grouped reports for one pair of specifications.
///
/// Reports are computed on first access and cached for the lifetime of this
/// value only.
pub struct ChangeClassifier<'a> {
    engine: DiffEngine<'a>,
    changes: OnceCell<ChangeSet>,
    incompatibilities: OnceCell<IncompatibilitySet>,
}

impl<'a> ChangeClassifier<'a> {
    pub fn new(old: &'a dyn SpecificationView, new: &'a dyn SpecificationView) -> Self {
        Self::from_engine(DiffEngine::new(old, new))
    }

    pub fn from_engine(engine: DiffEngine<'a>) -> Self {
        Self {
            engine,
            changes: OnceCell::new(),
            incompatibilities: OnceCell::new(),
        }
    }

    pub fn engine(&self) -> &DiffEngine<'a> {
        &self.engine
    }

    /// Stops at the first incompatibility found; nothing is grouped or cached.
    pub fn compatible(&self) -> bool {
        !self.engine.has_removed_endpoints()
            && self.engine.incompatible_request_params().next().is_none()
            && self.engine.incompatible_response_attributes().next().is_none()
    }

    pub fn incompatibilities(&self) -> &IncompatibilitySet {
        self.incompatibilities.get_or_init(|| {
            let set = IncompatibilitySet {
                endpoints: self.engine.removed_endpoints(),
                request_params: group_by_endpoint(self.engine.incompatible_request_params()),
                response_attributes: group_by_endpoint(
                    self.engine.incompatible_response_attributes(),
                ),
            };
            tracing::debug!("Incompatibilities: {:?}", set.summary());
            set
        })
    }

    pub fn changes(&self) -> &ChangeSet {
        self.changes.get_or_init(|| {
            let set = ChangeSet {
                new_endpoints: self.engine.new_endpoints(),
                removed_endpoints: self.engine.removed_endpoints(),
                new_request_params: group_by_endpoint(self.engine.changed_request_params()),
                removed_request_params: group_by_endpoint(
                    self.engine.incompatible_request_params(),
                ),
                new_response_attributes: group_by_endpoint(
                    self.engine.changed_response_attributes(),
                ),
                removed_response_attributes: group_by_endpoint(
                    self.engine.incompatible_response_attributes(),
                ),
            };
            tracing::debug!("Changes: {:?}", set.summary());
            set
        })
    }
}
