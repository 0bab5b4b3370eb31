use crate::diff::entry::ChangeEntry;
use crate::spec::SpecificationView;
use indexmap::IndexSet;

/// Outcome of scanning one request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamDelta<'s> {
    /// Required on the `to` side but not on the `from` side.
    Required(&'s str),
    /// Same as `Required`, but the parameter's parent object does not exist on
    /// the `from` side at all, so it could never have been required there.
    RequiredUnderNewParent(&'s str),
    /// Accepted on the `from` side only.
    Absent(&'s str),
}

/// Outcome of scanning one response status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributeDelta<'s> {
    /// Attribute declared on the `from` side only.
    Attribute { code: &'s str, path: &'s str },
    /// Whole status code declared on the `from` side only.
    StatusCode(&'s str),
}

/// Raw differences between an old and a new specification.
///
/// Every generator builds a fresh iterator over the borrowed views, so a
/// caller can stop after the first item (existence check) or drain it
/// completely, and calling it again rescans from the start.
#[derive(Clone, Copy)]
pub struct DiffEngine<'a> {
    old: &'a dyn SpecificationView,
    new: &'a dyn SpecificationView,
}

impl<'a> DiffEngine<'a> {
    pub fn new(old: &'a dyn SpecificationView, new: &'a dyn SpecificationView) -> Self {
        Self { old, new }
    }

    /// Endpoints only the new version declares, sorted.
    pub fn new_endpoints(&self) -> Vec<String> {
        endpoint_difference(self.new.endpoints(), self.old.endpoints())
    }

    /// Endpoints only the old version declares, sorted.
    pub fn removed_endpoints(&self) -> Vec<String> {
        endpoint_difference(self.old.endpoints(), self.new.endpoints())
    }

    /// Short-circuiting form of `!removed_endpoints().is_empty()`.
    pub fn has_removed_endpoints(&self) -> bool {
        let new = self.new.endpoints();
        self.old
            .endpoints()
            .iter()
            .any(|endpoint| !new.contains(endpoint.as_str()))
    }

    /// Informational parameter changes: params that stopped being required and
    /// params the new version added.
    pub fn changed_request_params(&self) -> impl Iterator<Item = (&'a str, ChangeEntry)> + 'a {
        param_deltas(self.new, self.old).filter_map(|(endpoint, delta)| {
            let entry = match delta {
                ParamDelta::Required(path) => ChangeEntry::NoLongerRequiredParam {
                    path: path.to_string(),
                },
                ParamDelta::Absent(path) => ChangeEntry::NewParam {
                    path: path.to_string(),
                },
                ParamDelta::RequiredUnderNewParent(path) => {
                    tracing::trace!("{endpoint}: {path} belongs to a removed object, skipping");
                    return None;
                }
            };
            Some((endpoint, entry))
        })
    }

    /// Breaking parameter changes: newly imposed required params and params the
    /// new version no longer accepts.
    pub fn incompatible_request_params(
        &self,
    ) -> impl Iterator<Item = (&'a str, ChangeEntry)> + 'a {
        param_deltas(self.old, self.new).filter_map(|(endpoint, delta)| {
            let entry = match delta {
                ParamDelta::Required(path) => ChangeEntry::NewRequiredParam {
                    path: path.to_string(),
                },
                ParamDelta::Absent(path) => ChangeEntry::MissingParam {
                    path: path.to_string(),
                },
                ParamDelta::RequiredUnderNewParent(path) => {
                    tracing::trace!("{endpoint}: {path} belongs to a new object, skipping");
                    return None;
                }
            };
            Some((endpoint, entry))
        })
    }

    /// Attributes and status codes the new version added.
    pub fn changed_response_attributes(
        &self,
    ) -> impl Iterator<Item = (&'a str, ChangeEntry)> + 'a {
        attribute_deltas(self.new, self.old).map(|(endpoint, delta)| {
            let entry = match delta {
                AttributeDelta::Attribute { code, path } => ChangeEntry::NewAttribute {
                    code: code.to_string(),
                    path: path.to_string(),
                },
                AttributeDelta::StatusCode(code) => ChangeEntry::NewStatusCode {
                    code: code.to_string(),
                },
            };
            (endpoint, entry)
        })
    }

    /// Attributes and status codes the new version dropped.
    pub fn incompatible_response_attributes(
        &self,
    ) -> impl Iterator<Item = (&'a str, ChangeEntry)> + 'a {
        attribute_deltas(self.old, self.new).map(|(endpoint, delta)| {
            let entry = match delta {
                AttributeDelta::Attribute { code, path } => ChangeEntry::MissingAttribute {
                    code: code.to_string(),
                    path: path.to_string(),
                },
                AttributeDelta::StatusCode(code) => ChangeEntry::MissingStatusCode {
                    code: code.to_string(),
                },
            };
            (endpoint, entry)
        })
    }
}

fn endpoint_difference(from: &IndexSet<String>, other: &IndexSet<String>) -> Vec<String> {
    let mut endpoints: Vec<String> = from
        .iter()
        .filter(|endpoint| !other.contains(endpoint.as_str()))
        .cloned()
        .collect();
    endpoints.sort();
    endpoints
}

/// Endpoints of `from`, in declaration order, that `to` declares as well.
fn shared_endpoints<'s>(
    from: &'s dyn SpecificationView,
    to: &'s dyn SpecificationView,
) -> impl Iterator<Item = &'s str> + 's {
    from.endpoints()
        .iter()
        .filter(move |endpoint| to.endpoints().contains(endpoint.as_str()))
        .map(String::as_str)
}

/// True when the parameter's immediate parent prefix matches nothing in `from_all`.
///
/// Only one segment is inspected. A parameter without any `/` has no parent.
fn is_new_child(param: &str, from_all: Option<&IndexSet<String>>) -> bool {
    let Some(idx) = param.rfind('/') else {
        return false;
    };
    let prefix = &param[..=idx];
    !from_all.is_some_and(|all| all.iter().any(|existing| existing.starts_with(prefix)))
}

fn param_deltas<'s>(
    from: &'s dyn SpecificationView,
    to: &'s dyn SpecificationView,
) -> impl Iterator<Item = (&'s str, ParamDelta<'s>)> + 's {
    shared_endpoints(from, to).flat_map(move |endpoint| {
        let from_params = from.request_params().get(endpoint);
        let to_params = to.request_params().get(endpoint);
        let from_all = from_params.map(|params| &params.all);

        let newly_required = to_params
            .into_iter()
            .flat_map(|params| params.required.iter())
            .filter(move |param| {
                !from_params.is_some_and(|params| params.required.contains(param.as_str()))
            })
            .map(move |param| {
                if is_new_child(param, from_all) {
                    ParamDelta::RequiredUnderNewParent(param.as_str())
                } else {
                    ParamDelta::Required(param.as_str())
                }
            });

        let gone = from_params
            .into_iter()
            .flat_map(|params| params.all.iter())
            .filter(move |param| {
                !to_params.is_some_and(|params| params.all.contains(param.as_str()))
            })
            .map(|param| ParamDelta::Absent(param.as_str()));

        newly_required
            .chain(gone)
            .map(move |delta| (endpoint, delta))
    })
}

fn attribute_deltas<'s>(
    from: &'s dyn SpecificationView,
    to: &'s dyn SpecificationView,
) -> impl Iterator<Item = (&'s str, AttributeDelta<'s>)> + 's {
    shared_endpoints(from, to).flat_map(move |endpoint| {
        let to_codes = to.response_attributes().get(endpoint);

        from.response_attributes()
            .get(endpoint)
            .into_iter()
            .flat_map(|codes| codes.iter())
            .flat_map(move |(code, attributes)| {
                let code = code.as_str();
                let target = to_codes.and_then(|codes| codes.get(code));

                // Attribute-level diffing only applies when the code exists on both sides.
                let whole_code = target.is_none().then_some(AttributeDelta::StatusCode(code));
                let missing = target.into_iter().flat_map(move |target| {
                    attributes
                        .iter()
                        .filter(move |attribute| !target.contains(attribute.as_str()))
                        .map(move |attribute| AttributeDelta::Attribute {
                            code,
                            path: attribute.as_str(),
                        })
                });

                whole_code.into_iter().chain(missing)
            })
            .map(move |delta| (endpoint, delta))
    })
}
