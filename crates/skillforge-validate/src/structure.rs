use serde_json::Value;
use skillforge_core::is_truthy;

/// Top-level fields every specification must define.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "name",
    "description",
    "triggers",
    "inputs",
    "guardrails",
    "procedure",
    "output_contract",
];

const NAME_MAX_CHARS: usize = 64;
const DESCRIPTION_MAX_CHARS: usize = 1024;

/// Check a specification against the structural schema.
///
/// Returns every violation found, in check order. An empty list means the
/// spec is structurally valid. Checks never short-circuit each other: a
/// missing field is reported by the presence check and again by the value
/// check for that field.
pub fn validate_structure(spec: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    if !spec.is_object() {
        errors.push("Specification must be a JSON object".to_string());
        return errors;
    }

    for field in REQUIRED_FIELDS {
        if spec.get(field).is_none() {
            errors.push(format!("Missing required field: {field}"));
        }
    }

    check_bounded_text(&mut errors, spec, "name", NAME_MAX_CHARS);
    check_bounded_text(&mut errors, spec, "description", DESCRIPTION_MAX_CHARS);

    check_list(&mut errors, spec, "triggers", 2);
    check_list(&mut errors, spec, "inputs", 1);
    check_list(&mut errors, spec, "guardrails", 1);
    check_list(&mut errors, spec, "procedure", 1);

    check_output_contract(&mut errors, spec);

    if let Some(code_helper) = spec.get("code_helper") {
        if !code_helper.is_object() {
            errors.push("Field 'code_helper' must be an object".to_string());
        }
    }

    check_mcp_tools(&mut errors, spec);
    check_reference_files(&mut errors, spec);

    errors
}

fn check_bounded_text(errors: &mut Vec<String>, spec: &Value, field: &str, max: usize) {
    match spec.get(field) {
        Some(value) if is_truthy(value) => match value.as_str() {
            Some(text) => {
                let len = text.chars().count();
                if len > max {
                    errors.push(format!(
                        "Field '{field}' must be {max} characters or less (currently {len})"
                    ));
                }
            }
            None => errors.push(format!("Field '{field}' must be a string")),
        },
        _ => errors.push(format!("Field '{field}' cannot be empty")),
    }
}

fn check_list(errors: &mut Vec<String>, spec: &Value, field: &str, min: usize) {
    let len = match spec.get(field) {
        None => 0,
        Some(Value::Array(items)) => items.len(),
        Some(_) => {
            errors.push(format!("Field '{field}' must be an array"));
            return;
        }
    };
    if len < min {
        let noun = if min == 1 { "item" } else { "items" };
        errors.push(format!("Field '{field}' must have at least {min} {noun}"));
    }
}

fn check_output_contract(errors: &mut Vec<String>, spec: &Value) {
    let empty = Value::Object(Default::default());
    let contract = spec.get("output_contract").unwrap_or(&empty);
    if !contract.is_object() {
        errors.push("Field 'output_contract' must be an object".to_string());
        return;
    }

    if !contract.get("title").is_some_and(is_truthy) {
        errors.push("output_contract.title is required and cannot be empty".to_string());
    }

    match contract.get("sections") {
        None => errors.push("output_contract.sections must have at least 1 item".to_string()),
        Some(Value::Array(sections)) if sections.is_empty() => {
            errors.push("output_contract.sections must have at least 1 item".to_string())
        }
        Some(Value::Array(sections)) => check_sections(errors, sections),
        Some(_) => errors.push("output_contract.sections must be an array".to_string()),
    }

    match contract.get("tables") {
        Some(Value::Array(tables)) => check_tables(errors, tables),
        Some(tables) if is_truthy(tables) => {
            errors.push("output_contract.tables must be an array".to_string())
        }
        _ => {}
    }
}

fn check_sections(errors: &mut Vec<String>, sections: &[Value]) {
    let headings: Vec<Option<&Value>> = sections
        .iter()
        .filter(|s| s.is_object())
        .map(|s| s.get("heading"))
        .collect();
    if has_duplicates(&headings) {
        errors.push("Section headings must be unique".to_string());
    }

    for (i, section) in sections.iter().enumerate() {
        if !section.is_object() {
            errors.push(format!("Section {i} must be an object"));
            continue;
        }
        if !section.get("heading").is_some_and(is_truthy) {
            errors.push(format!("Section {i} missing 'heading'"));
        }
        if section.get("required").is_none() {
            errors.push(format!("Section {i} missing 'required' field"));
        }
    }
}

fn check_tables(errors: &mut Vec<String>, tables: &[Value]) {
    for (i, table) in tables.iter().enumerate() {
        if !table.is_object() {
            errors.push(format!("Table {i} must be an object"));
            continue;
        }
        match table.get("columns") {
            Some(Value::Array(columns)) if !columns.is_empty() => {
                let columns: Vec<&Value> = columns.iter().collect();
                if has_duplicates(&columns) {
                    errors.push(format!("Table {i} has duplicate column names"));
                }
            }
            Some(columns) if is_truthy(columns) => {
                errors.push(format!("Table {i} columns must be an array"));
            }
            _ => errors.push(format!("Table {i} must have at least 1 column")),
        }
    }
}

fn check_mcp_tools(errors: &mut Vec<String>, spec: &Value) {
    let Some(tools) = spec.get("mcp_tools").filter(|v| is_truthy(v)) else {
        return;
    };
    let Some(tools) = tools.as_array() else {
        errors.push("Field 'mcp_tools' must be an array".to_string());
        return;
    };
    for (i, tool) in tools.iter().enumerate() {
        match tool.as_str() {
            None => errors.push(format!("mcp_tools[{i}] must be a string")),
            Some(tool) if !tool.contains(':') => errors.push(format!(
                "mcp_tools[{i}] must use format 'ServerName:tool_name', got: {tool}"
            )),
            Some(_) => {}
        }
    }
}

fn check_reference_files(errors: &mut Vec<String>, spec: &Value) {
    let Some(refs) = spec.get("reference_files").filter(|v| is_truthy(v)) else {
        return;
    };
    let Some(refs) = refs.as_array() else {
        errors.push("Field 'reference_files' must be an array".to_string());
        return;
    };
    for (i, reference) in refs.iter().enumerate() {
        if !reference.is_object() {
            errors.push(format!("reference_files[{i}] must be an object"));
            continue;
        }
        let path = reference.get("path").and_then(Value::as_str).unwrap_or_default();
        if path.contains('\\') {
            errors.push(format!(
                "reference_files[{i}].path must use forward slashes, not backslashes"
            ));
        }
    }
}

fn has_duplicates<T: PartialEq>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .any(|(i, a)| items[i + 1..].iter().any(|b| a == b))
}
