//! REST interface and DTO stub generation from an OpenAPI document.
//!
//! The document is parsed with `oas3`; operations are grouped by their first
//! tag into one interface per tag (interface-only — no controller bodies),
//! and every component schema becomes a DTO class. Schema details are walked
//! as JSON values so `$ref` handling stays uniform between typed and inline
//! schemas.

use askama::Template;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use oas3::spec::{ObjectOrReference, ObjectSchema, Operation, Parameter, ParameterIn};
use oas3::OpenApiV3Spec;

use crate::error::PipelineError;
use crate::naming::{java_import_for, package_to_path, to_camel_case, to_pascal_case};

use super::templates::{write_file, ApiInterfaceTemplate, ApiMethod, DtoTemplate, JavaField};

/// Declarative configuration for one API stub generation run.
#[derive(Debug)]
pub struct ApiStubConfig<'a> {
    pub spec_path: &'a Path,
    pub package_root: &'a str,
    pub project_dir: &'a Path,
}

/// Generate REST interface stubs and DTO classes from the API specification.
///
/// # Errors
///
/// An unreadable or unparsable specification is a fatal
/// [`PipelineError::Spec`]; file writes propagate as I/O errors.
pub fn generate(config: &ApiStubConfig<'_>) -> Result<(), PipelineError> {
    let spec = load_api_spec(config.spec_path)?;

    let api_package = format!("{}.interfaces.rest", config.package_root);
    let dto_package = format!("{}.interfaces.rest.dto", config.package_root);
    let java_root = config.project_dir.join("src").join("main").join("java");
    let api_dir = java_root.join(package_to_path(&api_package));
    let dto_dir = java_root.join(package_to_path(&dto_package));

    let dto_count = generate_dtos(&spec, &dto_package, &dto_dir)?;
    let api_count = generate_interfaces(&spec, &api_package, &dto_package, &api_dir)?;

    tracing::info!(
        "✅ generated {api_count} REST interfaces and {dto_count} DTO classes from {}",
        config.spec_path.display()
    );
    Ok(())
}

fn load_api_spec(path: &Path) -> Result<OpenApiV3Spec, PipelineError> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        PipelineError::Spec(format!("cannot read {}: {err}", path.display()))
    })?;
    let yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let spec: OpenApiV3Spec = if yaml {
        serde_yaml::from_str(&content)
            .map_err(|err| PipelineError::Spec(format!("invalid specification: {err}")))?
    } else {
        serde_json::from_str(&content)
            .map_err(|err| PipelineError::Spec(format!("invalid specification: {err}")))?
    };
    Ok(spec)
}

fn generate_dtos(
    spec: &OpenApiV3Spec,
    dto_package: &str,
    dto_dir: &Path,
) -> Result<usize, PipelineError> {
    let mut count = 0;
    if let Some(components) = spec.components.as_ref() {
        for (name, schema_ref) in &components.schemas {
            let schema = match schema_ref {
                ObjectOrReference::Object(obj) => obj,
                ObjectOrReference::Ref { .. } => continue,
            };
            let value = serde_json::to_value(schema)?;
            let properties = match value.get("properties").and_then(Value::as_object) {
                Some(props) if !props.is_empty() => props.clone(),
                // Aliases of primitives and arrays do not become classes.
                _ => continue,
            };

            let mut fields = Vec::new();
            for (prop, prop_schema) in &properties {
                let java_type = java_type_for_schema_value(prop_schema);
                fields.push(JavaField::new(&java_identifier(prop), &java_type));
            }
            let class_name = java_class_name(name);
            let rendered = DtoTemplate {
                package_name: dto_package.to_string(),
                class_name: class_name.clone(),
                imports: imports_for_types(fields.iter().map(|f| f.java_type.as_str())),
                fields,
            }
            .render()?;
            write_file(&dto_dir.join(format!("{class_name}.java")), &rendered)?;
            count += 1;
        }
    }
    Ok(count)
}

fn generate_interfaces(
    spec: &OpenApiV3Spec,
    api_package: &str,
    dto_package: &str,
    api_dir: &Path,
) -> Result<usize, PipelineError> {
    let mut interfaces: BTreeMap<String, (Vec<ApiMethod>, Vec<String>)> = BTreeMap::new();

    if let Some(paths) = spec.paths.as_ref() {
        for (path, item) in paths {
            for (method, operation) in item.methods() {
                let annotation = match method.to_string().to_ascii_uppercase().as_str() {
                    "GET" => "GetMapping",
                    "POST" => "PostMapping",
                    "PUT" => "PutMapping",
                    "DELETE" => "DeleteMapping",
                    "PATCH" => "PatchMapping",
                    _ => continue,
                };
                let class_name = operation
                    .tags
                    .first()
                    .map(|tag| format!("{}Api", java_class_name(tag)))
                    .unwrap_or_else(|| "DefaultApi".to_string());

                let mut params: Vec<String> = Vec::new();
                let mut types: Vec<String> = Vec::new();
                for p in item.parameters.iter().chain(operation.parameters.iter()) {
                    if let Some((rendered, java_type)) = render_parameter(spec, p) {
                        params.push(rendered);
                        types.push(java_type);
                    }
                }
                if let Some(body_type) = request_body_type(operation) {
                    params.push(format!("@RequestBody {body_type} body"));
                    types.push(body_type);
                }
                let return_type = response_type(operation);
                types.push(return_type.clone());

                let entry = interfaces.entry(class_name).or_default();
                entry.0.push(ApiMethod {
                    annotation: annotation.to_string(),
                    path: path.clone(),
                    name: method_name(operation, &method.to_string(), path),
                    return_type,
                    params: params.join(", "),
                });
                entry.1.extend(types);
            }
        }
    }

    for (class_name, (methods, types)) in &interfaces {
        let rendered = ApiInterfaceTemplate {
            package_name: api_package.to_string(),
            dto_package: dto_package.to_string(),
            class_name: class_name.clone(),
            imports: imports_for_types(types.iter().map(String::as_str)),
            methods: methods.clone(),
        }
        .render()?;
        write_file(&api_dir.join(format!("{class_name}.java")), &rendered)?;
    }
    Ok(interfaces.len())
}

fn render_parameter(
    spec: &OpenApiV3Spec,
    p: &ObjectOrReference<Parameter>,
) -> Option<(String, String)> {
    let param = match p {
        ObjectOrReference::Object(obj) => obj,
        ObjectOrReference::Ref { ref_path, .. } => resolve_parameter_ref(spec, ref_path)?,
    };
    let annotation = match param.location {
        ParameterIn::Path => format!("@PathVariable(\"{}\")", param.name),
        ParameterIn::Query => format!("@RequestParam(\"{}\")", param.name),
        ParameterIn::Header => format!("@RequestHeader(\"{}\")", param.name),
        ParameterIn::Cookie => return None,
    };
    let java_type = param
        .schema
        .as_ref()
        .map(java_type_for_schema_ref)
        .unwrap_or_else(|| "String".to_string());
    let rendered = format!(
        "{annotation} {java_type} {}",
        java_identifier(&param.name)
    );
    Some((rendered, java_type))
}

fn resolve_parameter_ref<'a>(spec: &'a OpenApiV3Spec, ref_path: &str) -> Option<&'a Parameter> {
    let name = ref_path.strip_prefix("#/components/parameters/")?;
    spec.components
        .as_ref()?
        .parameters
        .get(name)
        .and_then(|param_ref| match param_ref {
            ObjectOrReference::Object(param) => Some(param),
            _ => None,
        })
}

fn request_body_type(operation: &Operation) -> Option<String> {
    match operation.request_body.as_ref()? {
        ObjectOrReference::Object(body) => {
            let media = body.content.get("application/json")?;
            let schema = media.schema.as_ref()?;
            Some(java_type_for_schema_ref(schema))
        }
        ObjectOrReference::Ref { .. } => None,
    }
}

/// Pick the success response media type and map it to a Java type.
/// `200` wins, then any 2xx in status order; no schema means `Void`.
fn response_type(operation: &Operation) -> String {
    let responses = match operation.responses.as_ref() {
        Some(map) => map,
        None => return "Void".to_string(),
    };
    let mut candidates: Vec<&String> = responses
        .keys()
        .filter(|status| status.starts_with('2'))
        .collect();
    candidates.sort();
    for status in candidates {
        if let Some(ObjectOrReference::Object(response)) = responses.get(status) {
            if let Some(media) = response.content.get("application/json") {
                if let Some(schema) = media.schema.as_ref() {
                    return match schema {
                        ObjectOrReference::Ref { ref_path, .. } => dto_name_from_ref(ref_path),
                        ObjectOrReference::Object(obj) => serde_json::to_value(obj)
                            .map(|v| java_type_for_schema_value(&v))
                            .unwrap_or_else(|_| "Object".to_string()),
                    };
                }
            }
        }
    }
    "Void".to_string()
}

fn java_type_for_schema_ref(schema: &ObjectOrReference<ObjectSchema>) -> String {
    match schema {
        ObjectOrReference::Ref { ref_path, .. } => dto_name_from_ref(ref_path),
        ObjectOrReference::Object(obj) => serde_json::to_value(obj)
            .map(|v| java_type_for_schema_value(&v))
            .unwrap_or_else(|_| "Object".to_string()),
    }
}

/// Map an OpenAPI schema (as a JSON value) to a Java type.
fn java_type_for_schema_value(schema: &Value) -> String {
    if let Some(ref_path) = schema.get("$ref").and_then(Value::as_str) {
        return dto_name_from_ref(ref_path);
    }
    let format = schema.get("format").and_then(Value::as_str);
    match schema_type_str(schema).as_deref() {
        Some("array") => {
            let inner = schema
                .get("items")
                .map(java_type_for_schema_value)
                .unwrap_or_else(|| "Object".to_string());
            format!("List<{inner}>")
        }
        Some("string") => match format {
            Some("date") => "LocalDate".to_string(),
            Some("date-time") => "OffsetDateTime".to_string(),
            Some("uuid") => "UUID".to_string(),
            Some("byte") | Some("binary") => "byte[]".to_string(),
            _ => "String".to_string(),
        },
        Some("integer") => match format {
            Some("int64") => "Long".to_string(),
            _ => "Integer".to_string(),
        },
        Some("number") => match format {
            Some("float") => "Float".to_string(),
            Some("double") => "Double".to_string(),
            _ => "BigDecimal".to_string(),
        },
        Some("boolean") => "Boolean".to_string(),
        _ => "Object".to_string(),
    }
}

/// OpenAPI 3.1 allows `type` to be a list (`["string", "null"]`); the first
/// non-null entry decides the Java type.
fn schema_type_str(schema: &Value) -> Option<String> {
    match schema.get("type") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null")
            .map(str::to_string),
        _ => None,
    }
}

fn dto_name_from_ref(ref_path: &str) -> String {
    let name = ref_path
        .strip_prefix("#/components/schemas/")
        .unwrap_or(ref_path);
    java_class_name(name)
}

/// Component schema names keep their casing apart from an upper-cased first
/// character; invalid identifier characters are dropped.
fn java_class_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if cleaned.contains('_') {
        return to_pascal_case(&cleaned.to_ascii_lowercase());
    }
    let mut chars = cleaned.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Unnamed".to_string(),
    }
}

/// Property and parameter names become lowerCamelCase Java identifiers.
fn java_identifier(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if cleaned.contains('_') {
        to_camel_case(&cleaned.to_ascii_lowercase())
    } else {
        let mut chars = cleaned.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
            None => "value".to_string(),
        }
    }
}

fn method_name(operation: &Operation, method: &str, path: &str) -> String {
    if let Some(op_id) = operation.operation_id.as_deref() {
        return java_identifier(op_id);
    }
    let mut raw = method.to_ascii_lowercase();
    for segment in path.split('/') {
        let cleaned: String = segment
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        if !cleaned.is_empty() {
            raw.push('_');
            raw.push_str(&cleaned.to_ascii_lowercase());
        }
    }
    to_camel_case(&raw)
}

fn imports_for_types<'a>(types: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut imports: Vec<String> = Vec::new();
    for ty in types {
        let inner = ty
            .strip_prefix("List<")
            .and_then(|s| s.strip_suffix('>'))
            .unwrap_or(ty);
        if let Some(import) = java_import_for(inner) {
            if !imports.iter().any(|i| i == import) {
                imports.push(import.to_string());
            }
        }
    }
    imports.sort();
    imports
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_java_type_for_schema_value_primitives() {
        assert_eq!(java_type_for_schema_value(&json!({"type": "string"})), "String");
        assert_eq!(
            java_type_for_schema_value(&json!({"type": "integer", "format": "int64"})),
            "Long"
        );
        assert_eq!(
            java_type_for_schema_value(&json!({"type": "string", "format": "uuid"})),
            "UUID"
        );
        assert_eq!(
            java_type_for_schema_value(&json!({"type": "number"})),
            "BigDecimal"
        );
    }

    #[test]
    fn test_java_type_for_nullable_union() {
        assert_eq!(
            java_type_for_schema_value(&json!({"type": ["string", "null"]})),
            "String"
        );
    }

    #[test]
    fn test_array_of_refs_maps_to_list() {
        let schema = json!({
            "type": "array",
            "items": {"$ref": "#/components/schemas/Pet"}
        });
        assert_eq!(java_type_for_schema_value(&schema), "List<Pet>");
    }

    #[test]
    fn test_class_and_identifier_names() {
        assert_eq!(java_class_name("pet"), "Pet");
        assert_eq!(java_class_name("OrderItem"), "OrderItem");
        assert_eq!(java_class_name("user_account"), "UserAccount");
        assert_eq!(java_identifier("created_at"), "createdAt");
        assert_eq!(java_identifier("petId"), "petId");
    }

    #[test]
    fn test_missing_spec_file_is_spec_error() {
        let err = load_api_spec(Path::new("/nonexistent/openapi.yaml")).unwrap_err();
        assert!(matches!(err, PipelineError::Spec(_)));
    }
}
