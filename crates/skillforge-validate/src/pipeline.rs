use serde::Serialize;
use serde_json::Value;
use skillforge_core::SpecDocument;
use std::path::Path;
use tracing::{debug, info};

use crate::practices::{PracticeWarning, validate_best_practices};
use crate::registry::ValidatorRegistry;
use crate::structure::validate_structure;

/// Outcome of validating one specification.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Blocking problems. Empty means the spec is valid.
    pub errors: Vec<String>,
    /// Advisory findings; only computed when `errors` is empty.
    pub warnings: Vec<PracticeWarning>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn single_error(message: String) -> Self {
        Self {
            errors: vec![message],
            warnings: Vec::new(),
        }
    }
}

/// Validate an in-memory specification.
///
/// Structural checks run first, then the registry's validators. The linter
/// only runs when both came back clean and `best_practices` is set.
pub fn validate_document(
    spec: &Value,
    registry: &ValidatorRegistry,
    best_practices: bool,
) -> ValidationReport {
    let mut errors = validate_structure(spec);
    errors.extend(registry.run(spec));

    let warnings = if errors.is_empty() && best_practices {
        validate_best_practices(spec)
    } else {
        Vec::new()
    };

    debug!(
        errors = errors.len(),
        warnings = warnings.len(),
        validators = registry.len(),
        "validated specification"
    );
    ValidationReport { errors, warnings }
}

/// Load and validate a specification file.
///
/// A file that cannot be read or parsed yields a report with exactly one
/// error describing why; no further checks run.
pub fn validate_spec_file(
    path: &Path,
    registry: &ValidatorRegistry,
    best_practices: bool,
) -> ValidationReport {
    let doc = match SpecDocument::from_file(path) {
        Ok(doc) => doc,
        Err(e) => {
            info!(path = ?path, error = %e, "spec could not be loaded");
            return ValidationReport::single_error(e.to_string());
        }
    };
    validate_document(doc.value(), registry, best_practices)
}
