use serde_json::Value;
use tracing::warn;

/// A named, caller-supplied validation rule.
///
/// Validators return structural error messages. Returning `Err` means the
/// validator itself broke; the registry reports that as an error message and
/// keeps running the remaining validators.
pub trait SpecValidator: Send + Sync {
    fn name(&self) -> &str;
    fn validate(&self, spec: &Value) -> skillforge_core::Result<Vec<String>>;
}

/// An ordered set of [`SpecValidator`]s.
///
/// Build one per call site and pass it to [`crate::validate_document`].
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: Vec<Box<dyn SpecValidator>>,
}

impl ValidatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in trigger and output-contract checks.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(TriggerValidator));
        registry.register(Box::new(OutputContractValidator));
        registry
    }

    pub fn register(&mut self, validator: Box<dyn SpecValidator>) {
        self.validators.push(validator);
    }

    /// Register a closure as a validator.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&Value) -> skillforge_core::Result<Vec<String>> + Send + Sync + 'static,
    {
        self.register(Box::new(FnValidator {
            name: name.into(),
            f,
        }));
    }

    pub fn names(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run every validator in registration order and collect their messages.
    pub fn run(&self, spec: &Value) -> Vec<String> {
        let mut errors = Vec::new();
        for validator in &self.validators {
            match validator.validate(spec) {
                Ok(found) => errors.extend(found),
                Err(e) => {
                    warn!(validator = validator.name(), error = %e, "custom validator failed");
                    errors.push(format!("Custom validator '{}' failed: {}", validator.name(), e));
                }
            }
        }
        errors
    }
}

struct FnValidator<F> {
    name: String,
    f: F,
}

impl<F> SpecValidator for FnValidator<F>
where
    F: Fn(&Value) -> skillforge_core::Result<Vec<String>> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, spec: &Value) -> skillforge_core::Result<Vec<String>> {
        (self.f)(spec)
    }
}

// ── Built-in validators ────────────────────────────────────────

const MAX_TRIGGER_CHARS: usize = 200;
const MAX_HEADING_CHARS: usize = 100;
const MAX_SECTIONS: usize = 20;

/// Trigger phrases must be non-blank and reasonably short.
pub struct TriggerValidator;

impl SpecValidator for TriggerValidator {
    fn name(&self) -> &str {
        "triggers"
    }

    fn validate(&self, spec: &Value) -> skillforge_core::Result<Vec<String>> {
        let mut errors = Vec::new();
        let Some(triggers) = spec.get("triggers").and_then(Value::as_array) else {
            return Ok(errors);
        };
        for (i, trigger) in triggers.iter().enumerate() {
            let Some(trigger) = trigger.as_str() else {
                continue;
            };
            let n = i + 1;
            if trigger.chars().count() > MAX_TRIGGER_CHARS {
                errors.push(format!(
                    "Trigger {n} is too long (keep under {MAX_TRIGGER_CHARS} characters)"
                ));
            }
            if trigger.trim().is_empty() {
                errors.push(format!("Trigger {n} is empty"));
            }
        }
        Ok(errors)
    }
}

/// Output contracts should stay readable: short headings, a bounded number
/// of sections.
pub struct OutputContractValidator;

impl SpecValidator for OutputContractValidator {
    fn name(&self) -> &str {
        "output_contract"
    }

    fn validate(&self, spec: &Value) -> skillforge_core::Result<Vec<String>> {
        let mut errors = Vec::new();
        let Some(sections) = spec
            .get("output_contract")
            .and_then(|c| c.get("sections"))
            .and_then(Value::as_array)
        else {
            return Ok(errors);
        };

        for (i, section) in sections.iter().enumerate() {
            let heading = section.get("heading").and_then(Value::as_str).unwrap_or_default();
            if heading.chars().count() > MAX_HEADING_CHARS {
                errors.push(format!(
                    "Section {} heading is too long (keep under {MAX_HEADING_CHARS} characters)",
                    i + 1
                ));
            }
        }
        if sections.len() > MAX_SECTIONS {
            errors.push(
                "Output contract has many sections - consider grouping related content".to_string(),
            );
        }
        Ok(errors)
    }
}
