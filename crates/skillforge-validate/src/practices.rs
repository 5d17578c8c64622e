//! Best-practice linting.
//!
//! Every rule is independent and runs regardless of what earlier rules found.
//! Findings are advisory: they never make a spec invalid.

use serde::Serialize;
use serde_json::Value;
use skillforge_core::is_truthy;
use std::fmt;

const VAGUE_NAME_TERMS: [&str; 5] = ["helper", "utils", "tools", "manager", "handler"];

const PERSONAL_PHRASES: [&str; 7] = [
    "i can", "you can", "this will", "i will", "you will", "we can", "let me",
];

const WHEN_INDICATORS: [&str; 5] = [" when ", " for ", " use ", " helps ", " enables "];

const TIME_SENSITIVE_PATTERNS: [&str; 12] = [
    "as of ",
    "current",
    "latest",
    "2024",
    "2025",
    "2026",
    "recent",
    "now uses",
    "currently",
    "at the moment",
    "today",
    "this year",
];

const VALIDATION_KEYWORDS: [&str; 5] = ["validate", "verify", "check", "ensure", "confirm"];

const NETWORK_KEYWORDS: [&str; 5] = ["requests", "urllib", "http", "api call", "fetch"];

const MAX_REFERENCE_DEPTH: usize = 2;
const MAX_ESTIMATED_LINES: usize = 400;

/// What a best-practice warning is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Name,
    Description,
    FilePaths,
    TimeSensitive,
    McpTools,
    Validation,
    ReferenceFiles,
    CodeHelper,
    ValidationScript,
    Length,
    NetworkAccess,
    Security,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Name => "NAME",
            Category::Description => "DESCRIPTION",
            Category::FilePaths => "FILE PATHS",
            Category::TimeSensitive => "TIME-SENSITIVE",
            Category::McpTools => "MCP TOOLS",
            Category::Validation => "VALIDATION",
            Category::ReferenceFiles => "REFERENCE FILES",
            Category::CodeHelper => "CODE HELPER",
            Category::ValidationScript => "VALIDATION SCRIPT",
            Category::Length => "SKILL.MD LENGTH",
            Category::NetworkAccess => "NETWORK ACCESS",
            Category::Security => "SECURITY",
        };
        f.write_str(label)
    }
}

/// A single advisory finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PracticeWarning {
    pub category: Category,
    pub message: String,
}

impl PracticeWarning {
    fn new(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

impl fmt::Display for PracticeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "⚠️  {}: {}", self.category, self.message)
    }
}

/// Lint a specification for best-practice issues.
///
/// Intended to run after [`crate::validate_structure`] reported no errors, but
/// safe on any JSON value: fields with unexpected shapes are skipped.
pub fn validate_best_practices(spec: &Value) -> Vec<PracticeWarning> {
    let mut warnings = Vec::new();

    check_name(&mut warnings, spec);
    check_description(&mut warnings, spec);
    check_backslashes(&mut warnings, spec, String::new());
    check_time_sensitive(&mut warnings, spec);
    check_mcp_tools(&mut warnings, spec);
    check_feedback_loop(&mut warnings, spec);
    check_reference_depth(&mut warnings, spec);
    check_scripts(&mut warnings, spec);
    check_estimated_length(&mut warnings, spec);
    check_network_access(&mut warnings, spec);
    check_external_references(&mut warnings, spec);

    warnings
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn check_name(warnings: &mut Vec<PracticeWarning>, spec: &Value) {
    let Some(name) = str_field(spec, "name").filter(|n| !n.is_empty()) else {
        return;
    };

    let has_gerund = name
        .split_whitespace()
        .any(|word| word.to_lowercase().ends_with("ing"));
    if !has_gerund {
        warnings.push(PracticeWarning::new(
            Category::Name,
            format!(
                "Consider using gerund form (verb + -ing). Examples: 'Processing PDFs', \
                 'Analyzing Spreadsheets', 'Managing Databases'. Current: '{name}'."
            ),
        ));
    }

    let lowered = name.to_lowercase();
    if VAGUE_NAME_TERMS.iter().any(|term| lowered.contains(term)) {
        warnings.push(PracticeWarning::new(
            Category::Name,
            format!(
                "Avoid vague terms like 'Helper', 'Utils', 'Tools'. Be specific about what \
                 the skill does. Current: '{name}'"
            ),
        ));
    }
}

fn check_description(warnings: &mut Vec<PracticeWarning>, spec: &Value) {
    let Some(description) = str_field(spec, "description").filter(|d| !d.is_empty()) else {
        return;
    };
    let lowered = description.to_lowercase();

    if PERSONAL_PHRASES.iter().any(|p| lowered.contains(p)) {
        let opening: String = description.chars().take(50).collect();
        warnings.push(PracticeWarning::new(
            Category::Description,
            format!(
                "Use active voice without first/second person. Good: 'Processes Excel files \
                 and generates reports'. Avoid: 'I can help you process' or 'You can use this \
                 to'. Current starts: '{opening}...'"
            ),
        ));
    }

    if !WHEN_INDICATORS.iter().any(|w| lowered.contains(w)) {
        warnings.push(PracticeWarning::new(
            Category::Description,
            "Include both WHAT it does and WHEN to use it. Example: 'Analyzes spreadsheets to \
             identify patterns (WHAT). Use when you need data insights or trend analysis (WHEN).'",
        ));
    }
}

fn check_backslashes(warnings: &mut Vec<PracticeWarning>, value: &Value, path: String) {
    match value {
        Value::String(s) if s.contains('\\') => {
            warnings.push(PracticeWarning::new(
                Category::FilePaths,
                format!(
                    "Use forward slashes only. Found backslash in '{path}': {s}. Change to: {}",
                    s.replace('\\', "/")
                ),
            ));
        }
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                check_backslashes(warnings, child, child_path);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                check_backslashes(warnings, child, format!("{path}[{i}]"));
            }
        }
        _ => {}
    }
}

fn check_time_sensitive(warnings: &mut Vec<PracticeWarning>, spec: &Value) {
    let mut scan = |text: Option<&str>, field: String| {
        let Some(text) = text else { return };
        let lowered = text.to_lowercase();
        if let Some(pattern) = TIME_SENSITIVE_PATTERNS.iter().find(|p| lowered.contains(*p)) {
            warnings.push(PracticeWarning::new(
                Category::TimeSensitive,
                format!(
                    "Potential time-sensitive information in '{field}': '{pattern}'. Consider \
                     moving it to a separate 'Current Configuration' section that can be updated."
                ),
            ));
        }
    };

    scan(str_field(spec, "description"), "description".to_string());
    for (i, guard) in array_field(spec, "guardrails").iter().enumerate() {
        scan(guard.as_str(), format!("guardrails[{i}]"));
    }
}

fn check_mcp_tools(warnings: &mut Vec<PracticeWarning>, spec: &Value) {
    for tool in array_field(spec, "mcp_tools").iter().filter_map(Value::as_str) {
        if !tool.contains(':') {
            warnings.push(PracticeWarning::new(
                Category::McpTools,
                format!(
                    "'{tool}' should use format 'ServerName:tool_name'. Example: \
                     'BigQuery:run_query', 'GitHub:create_issue'."
                ),
            ));
        }
    }
}

fn check_feedback_loop(warnings: &mut Vec<PracticeWarning>, spec: &Value) {
    let serialized = spec.to_string().to_lowercase();
    let mentions_validation = VALIDATION_KEYWORDS.iter().any(|k| serialized.contains(k));
    let has_feedback_loop = spec
        .get("validation")
        .and_then(|v| v.get("feedback_loop"))
        .is_some_and(is_truthy);

    if mentions_validation && !has_feedback_loop {
        warnings.push(PracticeWarning::new(
            Category::Validation,
            "Skill mentions validation but doesn't define a feedback loop. Consider adding \
             validation.feedback_loop = true and validation.validator_script. Pattern: \
             Generate → Validate → Fix → Repeat.",
        ));
    }
}

fn check_reference_depth(warnings: &mut Vec<PracticeWarning>, spec: &Value) {
    for reference in array_field(spec, "reference_files") {
        let path = str_field(reference, "path").unwrap_or_default();
        if path.matches('/').count() > MAX_REFERENCE_DEPTH {
            warnings.push(PracticeWarning::new(
                Category::ReferenceFiles,
                format!(
                    "Path '{path}' is deeply nested. Keep references one level deep from \
                     SKILL.md for best performance."
                ),
            ));
        }
    }
}

fn enabled_scripts(spec: &Value) -> Option<&[Value]> {
    let code_helper = spec.get("code_helper")?;
    if !code_helper.get("enabled").is_some_and(is_truthy) {
        return None;
    }
    Some(array_field(code_helper, "scripts"))
}

fn check_scripts(warnings: &mut Vec<PracticeWarning>, spec: &Value) {
    let Some(scripts) = enabled_scripts(spec) else {
        return;
    };

    if scripts.is_empty() {
        warnings.push(PracticeWarning::new(
            Category::CodeHelper,
            "code_helper.enabled = true but no scripts defined. Add a scripts array with at \
             least one script, or set enabled = false.",
        ));
    }

    let has_validation = spec.get("validation").is_some_and(is_truthy);
    for script in scripts {
        if str_field(script, "execution_mode") != Some("execute") {
            continue;
        }
        let path = str_field(script, "path").unwrap_or_default();
        if path.to_lowercase().contains("validate") && !has_validation {
            warnings.push(PracticeWarning::new(
                Category::ValidationScript,
                format!(
                    "Found validation script '{path}' but validation config not defined. \
                     Consider adding a validation section."
                ),
            ));
        }
    }
}

/// Rough line count of the rendered skill definition.
pub fn estimated_lines(spec: &Value) -> usize {
    let count = |key: &str| array_field(spec, key).len();
    let sections = spec
        .get("output_contract")
        .map(|c| array_field(c, "sections").len())
        .unwrap_or_default();

    10 + count("triggers")
        + count("inputs")
        + count("guardrails")
        + count("procedure") * 2
        + sections * 3
        + count("example_triggers")
}

fn check_estimated_length(warnings: &mut Vec<PracticeWarning>, spec: &Value) {
    let estimate = estimated_lines(spec);
    if estimate > MAX_ESTIMATED_LINES {
        warnings.push(PracticeWarning::new(
            Category::Length,
            format!(
                "Estimated ~{estimate} lines in SKILL.md. Keep it under 500 lines; consider \
                 progressive disclosure to move some content to reference files."
            ),
        ));
    }
}

fn check_network_access(warnings: &mut Vec<PracticeWarning>, spec: &Value) {
    let Some(scripts) = enabled_scripts(spec) else {
        return;
    };
    for script in scripts {
        let serialized = script.to_string().to_lowercase();
        if NETWORK_KEYWORDS.iter().any(|k| serialized.contains(k)) {
            let path = str_field(script, "path").unwrap_or("<unnamed>");
            warnings.push(PracticeWarning::new(
                Category::NetworkAccess,
                format!(
                    "Script may require network access. Skills run in a sandboxed environment \
                     with NO network access. Script: '{path}'."
                ),
            ));
        }
    }
}

fn check_external_references(warnings: &mut Vec<PracticeWarning>, spec: &Value) {
    for reference in array_field(spec, "reference_files") {
        let path = str_field(reference, "path").unwrap_or_default();
        let lowered = path.to_lowercase();
        if lowered.contains("url") || lowered.contains("http") {
            warnings.push(PracticeWarning::new(
                Category::Security,
                format!(
                    "Reference file path contains 'url' or 'http': '{path}'. Skills cannot \
                     fetch external resources. Bundle all files in the skill directory."
                ),
            ));
        }
    }
}
