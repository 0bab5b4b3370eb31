pub mod openapi;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Status code -> attribute paths declared for that response.
pub type ResponseAttributes = IndexMap<String, IndexSet<String>>;

/// Parameters accepted by one endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestParams {
    /// Paths that callers must send.
    pub required: IndexSet<String>,
    /// Every accepted path, required or not.
    pub all: IndexSet<String>,
}

impl RequestParams {
    /// Record a parameter path, marking it required when asked.
    pub fn insert(&mut self, path: impl Into<String>, required: bool) {
        let path = path.into();
        if required {
            self.required.insert(path.clone());
        }
        self.all.insert(path);
    }
}

/// Read-only indexed projection of one parsed API description.
///
/// The diff engine only ever reads through this trait. Iteration order of the
/// returned collections is the declaration order of the source document, which
/// is what "discovery order" of diff entries refers to.
pub trait SpecificationView {
    /// Endpoint identifiers (`"METHOD /path operationId:ID"`).
    fn endpoints(&self) -> &IndexSet<String>;

    /// Endpoint id -> request parameters.
    fn request_params(&self) -> &IndexMap<String, RequestParams>;

    /// Endpoint id -> status code -> attribute paths.
    fn response_attributes(&self) -> &IndexMap<String, ResponseAttributes>;
}

/// Build the identifier for one operation.
pub fn endpoint_id(method: &str, path: &str, operation_id: Option<&str>) -> String {
    format!(
        "{} {} operationId:{}",
        method.to_uppercase(),
        path,
        operation_id.unwrap_or_default()
    )
}

/// In-memory SpecificationView produced by the OpenAPI loader or built by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Specification {
    endpoints: IndexSet<String>,
    request_params: IndexMap<String, RequestParams>,
    response_attributes: IndexMap<String, ResponseAttributes>,
}

impl Specification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an endpoint. Declaring it twice is a no-op.
    pub fn add_endpoint(&mut self, endpoint: impl Into<String>) -> &mut Self {
        self.endpoints.insert(endpoint.into());
        self
    }

    /// Declare a request parameter, declaring the endpoint as well.
    pub fn add_param(&mut self, endpoint: &str, path: &str, required: bool) -> &mut Self {
        self.add_endpoint(endpoint);
        self.request_params
            .entry(endpoint.to_string())
            .or_default()
            .insert(path, required);
        self
    }

    /// Declare a status code for an endpoint without any attributes.
    pub fn add_response(&mut self, endpoint: &str, code: &str) -> &mut Self {
        self.add_endpoint(endpoint);
        self.response_attributes
            .entry(endpoint.to_string())
            .or_default()
            .entry(code.to_string())
            .or_default();
        self
    }

    /// Declare a response attribute under a status code.
    pub fn add_attribute(&mut self, endpoint: &str, code: &str, path: &str) -> &mut Self {
        self.add_endpoint(endpoint);
        self.response_attributes
            .entry(endpoint.to_string())
            .or_default()
            .entry(code.to_string())
            .or_default()
            .insert(path.to_string());
        self
    }

    /// Replace the parameters of an endpoint wholesale.
    pub fn set_params(&mut self, endpoint: &str, params: RequestParams) -> &mut Self {
        self.add_endpoint(endpoint);
        self.request_params.insert(endpoint.to_string(), params);
        self
    }

    /// Replace the responses of an endpoint wholesale.
    pub fn set_responses(&mut self, endpoint: &str, responses: ResponseAttributes) -> &mut Self {
        self.add_endpoint(endpoint);
        self.response_attributes
            .insert(endpoint.to_string(), responses);
        self
    }

    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }
}

impl SpecificationView for Specification {
    fn endpoints(&self) -> &IndexSet<String> {
        &self.endpoints
    }

    fn request_params(&self) -> &IndexMap<String, RequestParams> {
        &self.request_params
    }

    fn response_attributes(&self) -> &IndexMap<String, ResponseAttributes> {
        &self.response_attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_id_format() {
        assert_eq!(
            endpoint_id("get", "/pets/{id}", Some("getPet")),
            "GET /pets/{id} operationId:getPet"
        );
        assert_eq!(
            endpoint_id("post", "/health", None),
            "POST /health operationId:"
        );
    }

    #[test]
    fn builder_tracks_required_subset() {
        let mut spec = Specification::new();
        spec.add_param("GET /a operationId:a", "query:limit", false)
            .add_param("GET /a operationId:a", "path:id", true);

        let params = &spec.request_params()["GET /a operationId:a"];
        assert_eq!(params.all.len(), 2);
        assert!(params.required.contains("path:id"));
        assert!(!params.required.contains("query:limit"));
        assert_eq!(spec.endpoint_count(), 1);
    }

    #[test]
    fn builder_preserves_declaration_order() {
        let mut spec = Specification::new();
        spec.add_attribute("GET /a operationId:a", "200", "zeta")
            .add_attribute("GET /a operationId:a", "200", "alpha")
            .add_response("GET /a operationId:a", "404");

        let codes: Vec<_> = spec.response_attributes()["GET /a operationId:a"]
            .keys()
            .cloned()
            .collect();
        assert_eq!(codes, vec!["200", "404"]);
        let attrs: Vec<_> = spec.response_attributes()["GET /a operationId:a"]["200"]
            .iter()
            .cloned()
            .collect();
        assert_eq!(attrs, vec!["zeta", "alpha"]);
    }
}
