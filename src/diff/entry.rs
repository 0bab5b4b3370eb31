use serde::Serialize;

/// One atomic difference, grouped under the endpoint it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeEntry {
    /// Required by the new version but not by the old one.
    NewRequiredParam { path: String },
    /// Required by the old version but optional in the new one.
    NoLongerRequiredParam { path: String },
    /// Accepted by the new version only.
    NewParam { path: String },
    /// Accepted by the old version only.
    MissingParam { path: String },
    NewAttribute { code: String, path: String },
    MissingAttribute { code: String, path: String },
    NewStatusCode { code: String },
    MissingStatusCode { code: String },
}

impl ChangeEntry {
    /// Whether an existing caller of the old version can be broken by this entry.
    pub fn is_breaking(&self) -> bool {
        matches!(
            self,
            Self::NewRequiredParam { .. }
                | Self::MissingParam { .. }
                | Self::MissingAttribute { .. }
                | Self::MissingStatusCode { .. }
        )
    }
}
