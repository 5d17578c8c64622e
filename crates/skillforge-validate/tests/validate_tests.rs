use serde_json::{Value, json};
use skillforge_validate::*;

fn valid_spec() -> Value {
    json!({
        "name": "Analyzing Server Logs",
        "description": "Analyzes server logs to surface recurring failures. Use when triaging incidents.",
        "triggers": ["analyze these logs", "why did the server crash"],
        "inputs": ["Log files in plain text"],
        "guardrails": ["Quote log lines verbatim", "Never invent timestamps"],
        "procedure": ["Group log lines by error signature", "Rank groups by frequency"],
        "output_contract": {
            "title": "Log Triage Report",
            "sections": [
                {"heading": "Summary", "required": true, "body_hint": "Two sentences"},
                {"heading": "Top Failures", "required": true}
            ],
            "tables": [
                {"name": "Failures", "columns": ["Signature", "Count"]}
            ]
        }
    })
}

fn with(mut spec: Value, key: &str, value: Value) -> Value {
    spec[key] = value;
    spec
}

fn categories(warnings: &[PracticeWarning]) -> Vec<Category> {
    warnings.iter().map(|w| w.category).collect()
}

// ── Structural validation ──────────────────────────────────────

#[test]
fn test_valid_spec_has_no_errors_or_warnings() {
    let spec = valid_spec();
    assert!(validate_structure(&spec).is_empty());

    let report = validate_document(&spec, &ValidatorRegistry::builtin(), true);
    assert!(report.is_valid());
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
}

#[test]
fn test_each_missing_field_reported_once() {
    for field in REQUIRED_FIELDS {
        let mut spec = valid_spec();
        spec.as_object_mut().unwrap().remove(field);

        let errors = validate_structure(&spec);
        let expected = format!("Missing required field: {field}");
        assert_eq!(
            errors.iter().filter(|e| **e == expected).count(),
            1,
            "{field}: {errors:?}"
        );
    }
}

#[test]
fn test_empty_object_reports_everything() {
    let errors = validate_structure(&json!({}));
    assert_eq!(
        errors,
        vec![
            "Missing required field: name",
            "Missing required field: description",
            "Missing required field: triggers",
            "Missing required field: inputs",
            "Missing required field: guardrails",
            "Missing required field: procedure",
            "Missing required field: output_contract",
            "Field 'name' cannot be empty",
            "Field 'description' cannot be empty",
            "Field 'triggers' must have at least 2 items",
            "Field 'inputs' must have at least 1 item",
            "Field 'guardrails' must have at least 1 item",
            "Field 'procedure' must have at least 1 item",
            "output_contract.title is required and cannot be empty",
            "output_contract.sections must have at least 1 item",
        ]
    );
}

#[test]
fn test_length_limits() {
    let spec = with(valid_spec(), "description", json!("d".repeat(1025)));
    assert_eq!(
        validate_structure(&spec),
        vec!["Field 'description' must be 1024 characters or less (currently 1025)"]
    );
}

#[test]
fn test_wrong_types() {
    let mut spec = valid_spec();
    spec["triggers"] = json!("just one");
    spec["guardrails"] = json!({"a": 1});
    spec["output_contract"] = json!(["not", "an", "object"]);
    spec["code_helper"] = json!(true);
    assert_eq!(
        validate_structure(&spec),
        vec![
            "Field 'triggers' must be an array",
            "Field 'guardrails' must be an array",
            "Field 'output_contract' must be an object",
            "Field 'code_helper' must be an object",
        ]
    );
}

#[test]
fn test_duplicate_headings_single_error() {
    let mut spec = valid_spec();
    spec["output_contract"]["sections"] = json!([
        {"heading": "Summary", "required": true},
        {"heading": "Summary", "required": false},
        {"heading": "Summary", "required": false}
    ]);
    let errors = validate_structure(&spec);
    assert_eq!(errors, vec!["Section headings must be unique"]);
}

#[test]
fn test_section_shape_errors() {
    let mut spec = valid_spec();
    spec["output_contract"]["sections"] = json!([
        "Summary",
        {"heading": "", "required": true},
        {"heading": "Details"}
    ]);
    assert_eq!(
        validate_structure(&spec),
        vec![
            "Section 0 must be an object",
            "Section 1 missing 'heading'",
            "Section 2 missing 'required' field",
        ]
    );
}

#[test]
fn test_table_errors() {
    let mut spec = valid_spec();
    spec["output_contract"]["tables"] = json!([
        {"name": "A", "columns": ["x", "y", "x"]},
        {"name": "B", "columns": []},
        {"name": "C"},
        "D"
    ]);
    assert_eq!(
        validate_structure(&spec),
        vec![
            "Table 0 has duplicate column names",
            "Table 1 must have at least 1 column",
            "Table 2 must have at least 1 column",
            "Table 3 must be an object",
        ]
    );
}

#[test]
fn test_mcp_tool_format_flagged_by_both_tiers() {
    let spec = with(valid_spec(), "mcp_tools", json!(["BigQuery:run_query", "BigQuery_run_query", 7]));

    let errors = validate_structure(&spec);
    assert_eq!(
        errors,
        vec![
            "mcp_tools[1] must use format 'ServerName:tool_name', got: BigQuery_run_query",
            "mcp_tools[2] must be a string",
        ]
    );

    let warnings = validate_best_practices(&spec);
    let mcp: Vec<_> = warnings
        .iter()
        .filter(|w| w.category == Category::McpTools)
        .collect();
    assert_eq!(mcp.len(), 1);
    assert!(mcp[0].message.contains("'BigQuery_run_query'"));
}

#[test]
fn test_reference_file_errors() {
    let spec = with(
        valid_spec(),
        "reference_files",
        json!([{"path": "docs\\guide.md", "purpose": "p"}, "docs/x.md"]),
    );
    assert_eq!(
        validate_structure(&spec),
        vec![
            "reference_files[0].path must use forward slashes, not backslashes",
            "reference_files[1] must be an object",
        ]
    );

    let spec = with(valid_spec(), "reference_files", json!("docs/x.md"));
    assert_eq!(
        validate_structure(&spec),
        vec!["Field 'reference_files' must be an array"]
    );
}

// ── Best practices ─────────────────────────────────────────────

#[test]
fn test_gerund_name_passes_name_rules() {
    let spec = with(valid_spec(), "name", json!("Managing PDFs"));
    let warnings = validate_best_practices(&spec);
    assert!(!categories(&warnings).contains(&Category::Name));
}

#[test]
fn test_vague_non_gerund_name() {
    let spec = with(valid_spec(), "name", json!("Log Utils"));
    let warnings = validate_best_practices(&spec);
    assert_eq!(categories(&warnings), vec![Category::Name, Category::Name]);
}

#[test]
fn test_validation_mention_requires_feedback_loop() {
    let spec = with(
        valid_spec(),
        "procedure",
        json!(["Group log lines", "Verify every count against the raw file"]),
    );
    let warnings = validate_best_practices(&spec);
    assert_eq!(categories(&warnings), vec![Category::Validation]);

    let spec = with(
        spec,
        "validation",
        json!({"feedback_loop": true, "validation_pattern": "plan-validate-execute"}),
    );
    assert!(validate_best_practices(&spec).is_empty());
}

#[test]
fn test_code_helper_rules() {
    let spec = with(valid_spec(), "code_helper", json!({"enabled": true, "scripts": []}));
    assert_eq!(
        categories(&validate_best_practices(&spec)),
        vec![Category::CodeHelper]
    );

    let spec = with(
        valid_spec(),
        "code_helper",
        json!({
            "enabled": true,
            "scripts": [
                {"path": "code/Validate_output.py", "purpose": "p", "execution_mode": "execute"},
                {"path": "code/pull.py", "purpose": "Fetch remote data", "execution_mode": "reference"}
            ]
        }),
    );
    let warnings = validate_best_practices(&spec);
    // "validate" in the script path also trips the feedback-loop rule.
    assert_eq!(
        categories(&warnings),
        vec![
            Category::Validation,
            Category::ValidationScript,
            Category::NetworkAccess,
        ]
    );
    assert!(warnings[2].message.contains("code/pull.py"));
}

#[test]
fn test_disabled_code_helper_is_not_linted() {
    let spec = with(
        valid_spec(),
        "code_helper",
        json!({"enabled": false, "scripts": [{"path": "x.py", "purpose": "http fetch"}]}),
    );
    assert!(validate_best_practices(&spec).is_empty());
}

#[test]
fn test_reference_file_rules() {
    let spec = with(
        valid_spec(),
        "reference_files",
        json!([
            {"path": "reference/api.md", "purpose": "API"},
            {"path": "reference/a/b/deep.md", "purpose": "deep"},
            {"path": "reference/urls.md", "purpose": "links"}
        ]),
    );
    assert_eq!(
        categories(&validate_best_practices(&spec)),
        vec![Category::ReferenceFiles, Category::Security]
    );
}

#[test]
fn test_length_estimate() {
    let procedure: Vec<String> = (0..200).map(|i| format!("Step {i}")).collect();
    let spec = with(valid_spec(), "procedure", json!(procedure));
    let warnings = validate_best_practices(&spec);
    assert_eq!(categories(&warnings), vec![Category::Length]);
    assert!(warnings[0].message.contains("~421"));
}

#[test]
fn test_backslash_anywhere_is_warned() {
    let spec = with(valid_spec(), "inputs", json!(["C:\\logs\\app.log"]));
    let warnings = validate_best_practices(&spec);
    assert_eq!(categories(&warnings), vec![Category::FilePaths]);
    assert!(warnings[0].message.contains("C:/logs/app.log"));
}

// ── Pipeline ───────────────────────────────────────────────────

#[test]
fn test_linter_skipped_when_structure_fails() {
    let spec = with(valid_spec(), "name", json!("x".repeat(80)));
    let report = validate_document(&spec, &ValidatorRegistry::new(), true);
    assert!(!report.is_valid());
    assert!(report.warnings.is_empty());
}

#[test]
fn test_linter_can_be_disabled() {
    let spec = with(valid_spec(), "name", json!("Log Utils"));
    let report = validate_document(&spec, &ValidatorRegistry::new(), false);
    assert!(report.is_valid());
    assert!(report.warnings.is_empty());
}

#[test]
fn test_registry_errors_block_and_follow_structural_errors() {
    let mut registry = ValidatorRegistry::builtin();
    registry.register_fn("owner", |spec| {
        Ok(if spec.get("skill_metadata").is_none() {
            vec!["skill_metadata is required by policy".to_string()]
        } else {
            Vec::new()
        })
    });

    let spec = with(valid_spec(), "triggers", json!(["  ", "ok"]));
    let report = validate_document(&spec, &registry, true);
    assert_eq!(
        report.errors,
        vec!["Trigger 1 is empty", "skill_metadata is required by policy"]
    );
    assert!(report.warnings.is_empty());
}

#[test]
fn test_spec_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skill.spec.json");
    let report = validate_spec_file(&path, &ValidatorRegistry::builtin(), true);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with("Spec file not found:"));
}

#[test]
fn test_spec_file_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skill.spec.json");
    std::fs::write(&path, "{\"name\": \"x\",,}").unwrap();
    let report = validate_spec_file(&path, &ValidatorRegistry::builtin(), true);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with("Invalid JSON:"));
}

#[test]
fn test_spec_file_valid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skill.spec.json");
    std::fs::write(&path, serde_json::to_string_pretty(&valid_spec()).unwrap()).unwrap();
    let report = validate_spec_file(&path, &ValidatorRegistry::builtin(), true);
    assert!(report.is_valid(), "{:?}", report.errors);
}

#[test]
fn test_report_serializes() {
    let spec = with(valid_spec(), "name", json!("Log Utils"));
    let report = validate_document(&spec, &ValidatorRegistry::new(), true);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["errors"], json!([]));
    assert_eq!(json["warnings"][0]["category"], json!("name"));
}
