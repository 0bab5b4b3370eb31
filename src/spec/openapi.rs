use crate::errors::{Result, SpecDiffError};
use crate::spec::{endpoint_id, RequestParams, ResponseAttributes, Specification};
use indexmap::{IndexMap, IndexSet};
use serde_yaml::Value;
use std::path::Path;

const METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Load an OpenAPI 3 or Swagger 2 document from a YAML or JSON file.
pub fn load_specification(path: &Path) -> Result<Specification> {
    let content = std::fs::read_to_string(path).map_err(|_| SpecDiffError::NoFile {
        path: path.to_path_buf(),
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parsed = match ext {
        "yaml" | "yml" => parse_specification_yaml(&content),
        "json" => parse_specification_json(&content),
        _ => {
            // Try YAML first, fall back to JSON
            parse_specification_yaml(&content).or_else(|_| parse_specification_json(&content))
        }
    };

    let spec = parsed.map_err(|message| SpecDiffError::ParseError {
        file: path.to_path_buf(),
        message,
    })?;
    tracing::debug!(
        "Loaded {} endpoints from {}",
        spec.endpoint_count(),
        path.display()
    );
    Ok(spec)
}

/// Parse a specification from a YAML string.
pub fn parse_specification_yaml(content: &str) -> std::result::Result<Specification, String> {
    let value: Value =
        serde_yaml::from_str(content).map_err(|e| format!("YAML parse error: {e}"))?;
    parse_specification_value(&value)
}

/// Parse a specification from a JSON string.
pub fn parse_specification_json(content: &str) -> std::result::Result<Specification, String> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| format!("JSON parse error: {e}"))?;
    parse_specification_value(&value)
}

fn parse_specification_value(value: &Value) -> std::result::Result<Specification, String> {
    if !value.is_mapping() {
        return Err("document root is not a mapping".to_string());
    }

    let document = Document { root: value };
    let mut spec = Specification::new();

    let Some(paths) = value.get("paths").and_then(Value::as_mapping) else {
        return Ok(spec);
    };

    for (path_key, path_value) in paths {
        let Some(path_str) = path_key.as_str() else {
            continue;
        };
        let Some(path_item) = document.deref(path_value).and_then(Value::as_mapping) else {
            continue;
        };
        let shared_params = path_item.get("parameters");

        for (method_key, operation) in path_item {
            let Some(method) = method_key.as_str() else {
                continue;
            };
            if !METHODS.contains(&method) {
                continue;
            }

            let operation_id = operation.get("operationId").and_then(Value::as_str);
            let id = endpoint_id(method, path_str, operation_id);

            spec.set_params(&id, document.request_params(shared_params, operation));
            spec.set_responses(&id, document.response_attributes(operation));
        }
    }

    Ok(spec)
}

/// A parsed document, used to resolve local `$ref` pointers.
struct Document<'a> {
    root: &'a Value,
}

impl<'a> Document<'a> {
    /// Resolve a local JSON pointer such as `#/definitions/Pet`.
    fn resolve_pointer(&self, reference: &str) -> Option<&'a Value> {
        let pointer = reference.strip_prefix("#/")?;
        pointer.split('/').try_fold(self.root, |node, segment| {
            let segment = segment.replace("~1", "/").replace("~0", "~");
            node.get(segment.as_str())
        })
    }

    /// Follow `$ref` chains until a concrete node is reached.
    fn deref(&self, value: &'a Value) -> Option<&'a Value> {
        let mut current = value;
        let mut seen: Vec<&str> = Vec::new();
        while let Some(reference) = current.get("$ref").and_then(Value::as_str) {
            if seen.contains(&reference) {
                return None;
            }
            seen.push(reference);
            current = match self.resolve_pointer(reference) {
                Some(target) => target,
                None => {
                    tracing::warn!("Skipping unresolved reference {reference}");
                    return None;
                }
            };
        }
        Some(current)
    }

    fn request_params(&self, shared: Option<&'a Value>, operation: &'a Value) -> RequestParams {
        // Operation-level parameters override path-level ones with the same location and name.
        let mut declared: IndexMap<(String, String), &'a Value> = IndexMap::new();
        let lists = [shared, operation.get("parameters")];
        for param in lists
            .into_iter()
            .flatten()
            .filter_map(Value::as_sequence)
            .flatten()
        {
            let Some(param) = self.deref(param) else {
                continue;
            };
            let location = param.get("in").and_then(Value::as_str);
            let name = param.get("name").and_then(Value::as_str);
            if let (Some(location), Some(name)) = (location, name) {
                declared.insert((location.to_string(), name.to_string()), param);
            }
        }

        let mut params = RequestParams::default();
        for ((location, name), param) in declared {
            let required = location == "path" || is_true(param.get("required"));
            // `:` keeps the location from reading as a parent object.
            let base = format!("{location}:{name}");
            params.insert(base.clone(), required);
            if location == "body" {
                if let Some(schema) = param.get("schema") {
                    self.walk_schema(
                        schema,
                        &base,
                        required,
                        &mut Vec::new(),
                        &mut |path: String, req: bool| params.insert(path, req),
                    );
                }
            }
        }

        if let Some(body) = operation.get("requestBody").and_then(|b| self.deref(b)) {
            let required = is_true(body.get("required"));
            params.insert("body", required);
            if let Some(schema) = media_schema(body) {
                self.walk_schema(
                    schema,
                    "body",
                    required,
                    &mut Vec::new(),
                    &mut |path: String, req: bool| params.insert(path, req),
                );
            }
        }

        params
    }

    fn response_attributes(&self, operation: &'a Value) -> ResponseAttributes {
        let mut responses = ResponseAttributes::new();
        let Some(declared) = operation.get("responses").and_then(Value::as_mapping) else {
            return responses;
        };

        for (code_key, response) in declared {
            let Some(code) = key_string(code_key) else {
                continue;
            };
            let mut attributes = IndexSet::new();
            if let Some(response) = self.deref(response) {
                let schema = response.get("schema").or_else(|| media_schema(response));
                if let Some(schema) = schema {
                    self.walk_schema(
                        schema,
                        "",
                        true,
                        &mut Vec::new(),
                        &mut |path: String, _: bool| {
                            attributes.insert(path);
                        },
                    );
                }
            }
            responses.insert(code, attributes);
        }

        responses
    }

    /// Visit every property path below `schema`, reporting whether each one is required.
    ///
    /// A property is required when its parent is required and lists it in
    /// `required`. References already on the current descent are not re-entered.
    fn walk_schema(
        &self,
        schema: &'a Value,
        prefix: &str,
        required: bool,
        stack: &mut Vec<&'a str>,
        visit: &mut dyn FnMut(String, bool),
    ) {
        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            if stack.contains(&reference) {
                return;
            }
            let Some(target) = self.resolve_pointer(reference) else {
                tracing::warn!("Skipping unresolved reference {reference}");
                return;
            };
            stack.push(reference);
            self.walk_schema(target, prefix, required, stack, visit);
            stack.pop();
            return;
        }

        if let Some(members) = schema.get("allOf").and_then(Value::as_sequence) {
            for member in members {
                self.walk_schema(member, prefix, required, stack, visit);
            }
        }

        let required_names: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_sequence)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        if let Some(properties) = schema.get("properties").and_then(Value::as_mapping) {
            for (name_key, property) in properties {
                let Some(name) = name_key.as_str() else {
                    continue;
                };
                let path = join_path(prefix, name);
                let property_required = required && required_names.contains(&name);
                visit(path.clone(), property_required);
                self.walk_schema(property, &path, property_required, stack, visit);
            }
        }

        if let Some(items) = schema.get("items") {
            let item_prefix = format!("{prefix}[]");
            self.walk_schema(items, &item_prefix, required, stack, visit);
        }
    }
}

/// Schema of the first media type under `content` (OpenAPI 3).
fn media_schema(node: &Value) -> Option<&Value> {
    node.get("content")
        .and_then(Value::as_mapping)
        .and_then(|content| content.values().find_map(|media| media.get("schema")))
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

fn is_true(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(false)
}

/// Mapping keys may be strings or bare numbers (`200:` in YAML).
fn key_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
