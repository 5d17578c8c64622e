use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{ForgeError, Result};

/// A skill specification as loaded from a `skill.spec.json` document.
///
/// The document is kept as a loose JSON tree: the validators are the
/// authority on its shape, so nothing here assumes a field exists or has the
/// right type. Accessors return `None` (or a falsy default) when the tree
/// does not match.
#[derive(Debug, Clone)]
pub struct SpecDocument {
    value: Value,
    source: Option<PathBuf>,
}

impl SpecDocument {
    /// Read and parse a specification file.
    ///
    /// A missing file maps to [`ForgeError::SpecNotFound`] and malformed JSON
    /// to [`ForgeError::InvalidJson`], so callers can report either as a single
    /// message.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ForgeError::SpecNotFound(path.display().to_string()),
            _ => ForgeError::Io(e),
        })?;
        debug!(path = ?path, bytes = raw.len(), "read spec document");

        let mut doc = Self::parse(&raw)?;
        doc.source = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Parse a specification from JSON text.
    pub fn parse(raw: &str) -> Result<Self> {
        let value = serde_json::from_str(raw).map_err(|e| ForgeError::InvalidJson(e.to_string()))?;
        Ok(Self::from_value(value))
    }

    /// Wrap an already-parsed JSON tree.
    pub fn from_value(value: Value) -> Self {
        Self { value, source: None }
    }

    /// The raw JSON tree, used as the rendering context.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Path the document was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.value.get("name").and_then(Value::as_str)
    }

    /// Directory name for the scaffolded skill: the name lowercased with
    /// spaces replaced by hyphens.
    pub fn slug(&self) -> Option<String> {
        self.name().map(|n| n.to_lowercase().replace(' ', "-"))
    }

    pub fn output_contract(&self) -> Option<&Value> {
        self.value.get("output_contract")
    }

    /// Whether `code_helper.enabled` is set to a truthy value.
    pub fn code_helper_enabled(&self) -> bool {
        self.value
            .get("code_helper")
            .and_then(|c| c.get("enabled"))
            .is_some_and(is_truthy)
    }
}

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
